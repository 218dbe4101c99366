//! Root clusters: morphologically related surface forms grouped under a
//! three-letter consonantal key.

use std::sync::LazyLock;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;

/// Semantic grouping of a root cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootCategory {
    Speech,
    Writing,
    Law,
    Labor,
    Commerce,
    Family,
    Harm,
    Study,
    Motion,
    Action,
    Ritual,
}

/// A root cluster. Key and forms are stored normalized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RootEntry {
    pub key: String,
    pub forms: Vec<String>,
    pub meaning: String,
    pub category: RootCategory,
}

const ROOT_CLUSTERS: &[(&str, &str, RootCategory, &[&str])] = &[
    (
        "אמר",
        "say",
        RootCategory::Speech,
        &["אמר", "אומר", "אומרת", "אומרים", "אמרו", "אמרה", "ואמר", "מאמר", "אמירה", "אמירות", "נאמר"],
    ),
    (
        "דבר",
        "speak",
        RootCategory::Speech,
        &["דבר", "דיבר", "מדבר", "דיבור", "דברים", "דברי"],
    ),
    (
        "שאל",
        "ask",
        RootCategory::Speech,
        &["שאל", "שואל", "שאלה", "שאלות", "נשאל"],
    ),
    (
        "כתב",
        "write",
        RootCategory::Writing,
        &["כתב", "כותב", "כתוב", "כתבו", "כתיבה", "מכתב", "כתובה", "כתובות", "כתבי"],
    ),
    (
        "ספר",
        "book, tell",
        RootCategory::Writing,
        &["ספר", "ספרים", "סופר", "ספרות", "סיפור", "סיפורים"],
    ),
    (
        "דין",
        "judgment",
        RootCategory::Law,
        &["דין", "דינים", "דיין", "דיינים", "דינא", "נידון"],
    ),
    (
        "שפט",
        "judge",
        RootCategory::Law,
        &["שפט", "שופט", "שופטים", "משפט", "משפטים", "שפיטה", "נשפט"],
    ),
    (
        "פסק",
        "rule, decide",
        RootCategory::Law,
        &["פסק", "פוסק", "פוסקים", "פסקה", "פסיקה", "פסקי"],
    ),
    (
        "תבע",
        "sue, claim",
        RootCategory::Law,
        &["תבע", "תובע", "תובעת", "תובעים", "תביעה", "תביעות", "נתבע", "נתבעת"],
    ),
    (
        "ערר",
        "appeal",
        RootCategory::Law,
        &["ערר", "ערער", "ערעור", "ערעורים", "מערער", "מערערת"],
    ),
    (
        "חקק",
        "legislate",
        RootCategory::Law,
        &["חוק", "חוקים", "חקיקה", "מחוקק", "חוקה"],
    ),
    (
        "עבד",
        "work",
        RootCategory::Labor,
        &["עבד", "עובד", "עובדים", "עבודה", "עבודות", "מעביד", "מעבידים"],
    ),
    (
        "קנה",
        "acquire",
        RootCategory::Commerce,
        &["קנה", "קונה", "קניין", "קנין", "קנייה", "מקנה", "נקנה"],
    ),
    (
        "מכר",
        "sell",
        RootCategory::Commerce,
        &["מכר", "מוכר", "מכירה", "ממכר", "נמכר"],
    ),
    (
        "שלם",
        "pay, complete",
        RootCategory::Commerce,
        &["שלם", "שילם", "משלם", "תשלום", "תשלומים", "שלמות"],
    ),
    (
        "ירש",
        "inherit",
        RootCategory::Family,
        &["ירש", "יורש", "יורשים", "ירושה", "ירושות", "מוריש"],
    ),
    (
        "גנב",
        "steal",
        RootCategory::Harm,
        &["גנב", "גנבה", "גונב", "גניבה", "גנבים", "נגנב"],
    ),
    (
        "נזק",
        "damage",
        RootCategory::Harm,
        &["נזק", "נזקים", "נזיקין", "מזיק", "הזיק", "ניזוק"],
    ),
    (
        "למד",
        "learn",
        RootCategory::Study,
        &["למד", "לומד", "לימוד", "תלמוד", "תלמיד", "תלמידים", "מלמד", "למדו"],
    ),
    (
        "הלך",
        "walk, halakha",
        RootCategory::Motion,
        &["הלך", "הולך", "הלכה", "הלכות", "הליכה", "מהלך"],
    ),
    (
        "ישב",
        "sit",
        RootCategory::Motion,
        &["ישב", "יושב", "יושבים", "ישיבה", "מושב"],
    ),
    (
        "עשה",
        "do, make",
        RootCategory::Action,
        &["עשה", "עושה", "עשייה", "מעשה", "מעשים", "נעשה"],
    ),
    (
        "ברך",
        "bless",
        RootCategory::Ritual,
        &["ברך", "ברכה", "ברכות", "מברך", "בירך", "ברוך"],
    ),
    (
        "קדש",
        "holy",
        RootCategory::Ritual,
        &["קדש", "קודש", "קדושה", "מקדש", "קידוש", "קדוש"],
    ),
];

struct RootTable {
    entries: Vec<RootEntry>,
    by_key: AHashMap<String, usize>,
    by_form: AHashMap<String, usize>,
}

static ROOT_TABLE: LazyLock<RootTable> = LazyLock::new(|| {
    let mut entries = Vec::with_capacity(ROOT_CLUSTERS.len());
    let mut by_key = AHashMap::new();
    let mut by_form = AHashMap::new();

    for (slot, (key, meaning, category, forms)) in ROOT_CLUSTERS.iter().enumerate() {
        let key = normalize(key);
        let forms: Vec<String> = forms.iter().map(|f| normalize(f)).collect();
        by_key.insert(key.clone(), slot);
        for form in &forms {
            // first cluster wins for a form listed twice
            by_form.entry(form.clone()).or_insert(slot);
        }
        entries.push(RootEntry {
            key,
            forms,
            meaning: meaning.to_string(),
            category: *category,
        });
    }

    RootTable {
        entries,
        by_key,
        by_form,
    }
});

/// Look up a cluster by its root key.
pub fn root_entry(key: &str) -> Option<&'static RootEntry> {
    let table = &*ROOT_TABLE;
    table
        .by_key
        .get(&normalize(key))
        .map(|&slot| &table.entries[slot])
}

/// Root key of the cluster containing `form`, if any. `form` must be normalized.
pub fn root_for_form(form: &str) -> Option<&'static str> {
    let table = &*ROOT_TABLE;
    table
        .by_form
        .get(form)
        .map(|&slot| table.entries[slot].key.as_str())
}

/// Whether `key` (normalized) is a known root key.
pub fn is_root_key(key: &str) -> bool {
    ROOT_TABLE.by_key.contains_key(key)
}

/// Every cluster, in table order.
pub fn all_roots() -> &'static [RootEntry] {
    &ROOT_TABLE.entries
}
