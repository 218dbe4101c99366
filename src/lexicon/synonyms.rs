//! Synonym groups with symmetric membership lookup.

use std::sync::LazyLock;

use ahash::AHashMap;

use crate::analysis::normalizer::normalize;

const SYNONYM_GROUPS: &[&[&str]] = &[
    &["דין", "משפט", "חוק"],
    &["בית משפט", "ערכאה", "טריבונל"],
    &["תובע", "מבקש", "עותר"],
    &["נתבע", "משיב"],
    &["פסק דין", "החלטה", "הכרעה"],
    &["עורך דין", "פרקליט", "סניגור"],
    &["רבי", "רב", "רבן"],
    &["אמר", "סבר", "טען"],
    &["הלכה", "דין", "פסק"],
    &["חכם", "תלמיד חכם", "רב"],
    &["ערעור", "ערר", "השגה"],
    &["גניבה", "גזל"],
    &["נזק", "חבלה"],
    &["חוזה", "הסכם", "התקשרות"],
    &["שכר", "משכורת", "תמורה"],
    &["עובד", "שכיר"],
    &["מעביד", "מעסיק"],
];

struct SynonymTable {
    groups: Vec<Vec<String>>,
    membership: AHashMap<String, Vec<usize>>,
}

static SYNONYM_TABLE: LazyLock<SynonymTable> = LazyLock::new(|| {
    let groups: Vec<Vec<String>> = SYNONYM_GROUPS
        .iter()
        .map(|group| group.iter().map(|t| normalize(t)).collect())
        .collect();

    let mut membership: AHashMap<String, Vec<usize>> = AHashMap::new();
    for (slot, group) in groups.iter().enumerate() {
        for term in group {
            membership.entry(term.clone()).or_default().push(slot);
        }
    }

    SynonymTable { groups, membership }
});

/// Every term sharing a group with `term`, excluding `term` itself.
///
/// A term that belongs to several groups gets the union of all of them.
/// `term` is normalized before lookup; an unknown term yields an empty list.
pub fn synonyms_for(term: &str) -> Vec<String> {
    let term = normalize(term);
    let table = &*SYNONYM_TABLE;
    let mut result: Vec<String> = Vec::new();

    if let Some(slots) = table.membership.get(&term) {
        for &slot in slots {
            for member in &table.groups[slot] {
                if *member != term && !result.contains(member) {
                    result.push(member.clone());
                }
            }
        }
    }

    result
}

/// Whether two terms share a synonym group.
pub fn are_synonyms(a: &str, b: &str) -> bool {
    let b = normalize(b);
    synonyms_for(a).contains(&b)
}

/// All synonym groups (normalized).
pub fn synonym_groups() -> &'static [Vec<String>] {
    &SYNONYM_TABLE.groups
}
