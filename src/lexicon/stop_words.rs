//! Stop words: common function words that carry no search relevance.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::analysis::normalizer::normalize;

/// Default Hebrew stop words list.
const DEFAULT_HEBREW_STOP_WORDS: &[&str] = &[
    "של", "את", "על", "עם", "זה", "זו", "זאת", "הוא", "היא", "הם", "הן", "אני", "אתה", "אנחנו",
    "כי", "אם", "או", "גם", "לא", "כל", "מה", "מי", "אשר", "כמו", "אל", "יש", "אין", "רק", "עד",
    "אך", "בין", "כך", "כן", "היה", "היתה", "היו", "להיות", "אבל", "לכן", "שם", "פה", "כאן",
];

/// Latin-script function words that show up in mixed-language documents.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "in", "is", "it", "of", "on", "or",
    "the", "to", "with",
];

static STOP_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_HEBREW_STOP_WORDS
        .iter()
        .chain(DEFAULT_ENGLISH_STOP_WORDS)
        .map(|w| normalize(w))
        .collect()
});

/// Whether a normalized token is a stop word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// The normalized stop word set.
pub fn stop_words() -> &'static HashSet<String> {
    &STOP_WORDS
}
