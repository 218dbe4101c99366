//! Heuristic Hebrew morphology: affix stripping and root lookup.
//!
//! Hebrew attaches prepositions, conjunctions and the article as prefixes
//! (ו, ה, ב, כ, ל, מ, ש and their combinations) and marks number, gender and
//! possession with suffixes. [`RootExtractor`] strips those affixes and maps
//! the remaining stem to a root cluster from [`crate::lexicon::roots`].
//!
//! The model is intentionally lossy. When no cluster matches, the
//! [`PseudoRootPolicy`] decides what to return; the default takes the first
//! three letters of the stem, which trades precision for recall.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::lexicon::roots::{is_root_key, root_entry, root_for_form};

/// Minimum number of characters a stem must keep after stripping an affix.
pub const MIN_STEM_LEN: usize = 3;

const PREFIXES: &[&str] = &[
    "ו", "ה", "ב", "כ", "ל", "מ", "ש", "וה", "וב", "וכ", "ול", "ומ", "וש", "שה", "שב", "של", "שמ",
    "מה", "לה", "בה", "כש", "וכש", "ושה", "ושב", "ומה", "כשה",
];

const SUFFIXES: &[&str] = &[
    "ים", "ות", "ית", "יות", "ה", "ת", "י", "ו", "נו", "כם", "כן", "הם", "הן", "תם", "תן", "תי",
    "ני", "יה", "יו", "יך", "יהם", "יהן", "ותי", "ותיו",
];

/// Affix lists, normalized and ordered longest first.
static NORMALIZED_PREFIXES: LazyLock<Vec<String>> = LazyLock::new(|| longest_first(PREFIXES));
static NORMALIZED_SUFFIXES: LazyLock<Vec<String>> = LazyLock::new(|| longest_first(SUFFIXES));

fn longest_first(affixes: &[&str]) -> Vec<String> {
    let mut normalized: Vec<String> = affixes.iter().map(|a| normalize(a)).collect();
    normalized.sort_by_key(|a| std::cmp::Reverse(a.chars().count()));
    normalized.dedup();
    normalized
}

/// What to return when a word matches no root cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "length", rename_all = "snake_case")]
pub enum PseudoRootPolicy {
    /// Use the first `n` characters of the stripped stem.
    FirstChars(usize),
    /// Return `None` for unknown words.
    Disabled,
}

impl Default for PseudoRootPolicy {
    fn default() -> Self {
        PseudoRootPolicy::FirstChars(3)
    }
}

/// Maps words to root keys.
#[derive(Clone, Debug, Default)]
pub struct RootExtractor {
    policy: PseudoRootPolicy,
}

impl RootExtractor {
    /// Extractor with the default pseudo-root policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor with an explicit pseudo-root policy.
    pub fn with_policy(policy: PseudoRootPolicy) -> Self {
        RootExtractor { policy }
    }

    pub fn policy(&self) -> PseudoRootPolicy {
        self.policy
    }

    /// Root key of `word`, or `None` for empty input (or an unknown word when
    /// the pseudo-root policy is disabled).
    pub fn extract_root(&self, word: &str) -> Option<String> {
        let word = normalize(word);
        if word.is_empty() {
            return None;
        }

        let stem = stem(&word);
        if let Some(key) = lookup(&word).or_else(|| lookup(&stem)) {
            return Some(key);
        }

        match self.policy {
            PseudoRootPolicy::FirstChars(n) if n > 0 => Some(stem.chars().take(n).collect()),
            _ => None,
        }
    }
}

fn lookup(candidate: &str) -> Option<String> {
    if let Some(key) = root_for_form(candidate) {
        return Some(key.to_string());
    }
    if is_root_key(candidate) {
        return Some(candidate.to_string());
    }
    None
}

fn strip_prefix<'a>(word: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = word.strip_prefix(prefix)?;
    (rest.chars().count() >= MIN_STEM_LEN).then_some(rest)
}

fn strip_suffix(word: &str) -> String {
    for suffix in NORMALIZED_SUFFIXES.iter() {
        if let Some(rest) = word.strip_suffix(suffix.as_str()) {
            if rest.chars().count() >= MIN_STEM_LEN {
                return rest.to_string();
            }
        }
    }
    word.to_string()
}

/// Strip the longest admissible prefix, then the longest admissible suffix.
///
/// `word` must already be normalized.
pub fn stem(word: &str) -> String {
    let without_prefix = NORMALIZED_PREFIXES
        .iter()
        .find_map(|prefix| strip_prefix(word, prefix))
        .unwrap_or(word);
    strip_suffix(without_prefix)
}

/// Root key of `word` with the default policy.
///
/// ```
/// use mafteah::morphology::extract_root;
///
/// assert_eq!(extract_root("והמשפטים").as_deref(), Some("שפט"));
/// assert_eq!(extract_root(""), None);
/// ```
pub fn extract_root(word: &str) -> Option<String> {
    RootExtractor::new().extract_root(word)
}

/// Normalized surface forms of a root cluster; empty for an unknown key.
pub fn word_forms_for_root(key: &str) -> Vec<String> {
    root_entry(key)
        .map(|entry| entry.forms.clone())
        .unwrap_or_default()
}
