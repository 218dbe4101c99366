//! Hebrew abbreviation (rashei tevot) expansions.

use std::sync::LazyLock;

use ahash::AHashMap;

use crate::analysis::normalizer::normalize;
use crate::analysis::tokenizer::hebrew::{has_abbreviation_mark, strip_punctuation};

const ACRONYMS: &[(&str, &[&str])] = &[
    ("רמב\"ם", &["רבי משה בן מימון"]),
    ("רמב\"ן", &["רבי משה בן נחמן"]),
    ("רש\"י", &["רבי שלמה יצחקי"]),
    ("רשב\"א", &["רבי שלמה בן אדרת"]),
    ("חז\"ל", &["חכמינו זכרונם לברכה"]),
    ("ז\"ל", &["זכרונו לברכה"]),
    ("ע\"פ", &["על פי"]),
    ("אא\"כ", &["אלא אם כן"]),
    ("כנ\"ל", &["כנזכר לעיל"]),
    ("שו\"ע", &["שולחן ערוך"]),
    ("ביהמ\"ש", &["בית המשפט"]),
    ("בימ\"ש", &["בית משפט"]),
    ("בג\"ץ", &["בית משפט גבוה לצדק"]),
    ("עו\"ד", &["עורך דין"]),
    ("ת\"ק", &["תנא קמא"]),
    ("ב\"ה", &["ברוך השם", "בית הלל"]),
    ("ב\"ש", &["בית שמאי", "באר שבע"]),
    ("ת\"א", &["תל אביב"]),
    ("ח\"כ", &["חבר כנסת"]),
    ("ס\"ק", &["סעיף קטן"]),
];

/// Lookup key for an abbreviation: normalized with all punctuation removed.
pub fn acronym_key(abbreviation: &str) -> String {
    strip_punctuation(&normalize(abbreviation))
}

static ACRONYM_TABLE: LazyLock<AHashMap<String, Vec<String>>> = LazyLock::new(|| {
    ACRONYMS
        .iter()
        .map(|(abbreviation, expansions)| {
            (
                acronym_key(abbreviation),
                expansions.iter().map(|e| normalize(e)).collect(),
            )
        })
        .collect()
});

/// Whether a token is written like an abbreviation (carries a quote mark).
pub fn looks_like_acronym(token: &str) -> bool {
    has_abbreviation_mark(token)
}

/// Full forms of an abbreviation, normalized; empty when unknown.
///
/// Both ASCII quotes and gershayim are accepted: `רמב"ם` and `רמב״ם` resolve
/// to the same entry.
pub fn acronym_expansions(abbreviation: &str) -> Vec<String> {
    ACRONYM_TABLE
        .get(&acronym_key(abbreviation))
        .cloned()
        .unwrap_or_default()
}

/// Number of known abbreviations.
pub fn acronym_count() -> usize {
    ACRONYM_TABLE.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion() {
        assert_eq!(acronym_expansions("רמב\"ם"), vec!["רבי משה בנ מימונ"]);
        assert_eq!(acronym_expansions("רמב״ם"), vec!["רבי משה בנ מימונ"]);
    }

    #[test]
    fn test_multiple_expansions() {
        let expansions = acronym_expansions("ב\"ה");
        assert_eq!(expansions.len(), 2);
        assert!(expansions.contains(&"בית הלל".to_string()));
    }

    #[test]
    fn test_unknown() {
        assert!(acronym_expansions("קק\"ק").is_empty());
        assert!(acronym_expansions("").is_empty());
    }

    #[test]
    fn test_looks_like_acronym() {
        assert!(looks_like_acronym("עו\"ד"));
        assert!(looks_like_acronym("רש״י"));
        assert!(!looks_like_acronym("עוד"));
    }

    #[test]
    fn test_table_size() {
        assert_eq!(acronym_count(), ACRONYMS.len());
    }
}
