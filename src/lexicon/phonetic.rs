//! Phonetic letter classes.
//!
//! Letters that sound the same in modern pronunciation are grouped; every
//! letter is replaced by its class representative (the first letter of the
//! class) to build a phonetic key.

use std::sync::LazyLock;

use ahash::AHashMap;

use crate::analysis::normalizer::normalize;

const PHONETIC_CLASSES: &[&[char]] = &[
    &['א', 'ע'],
    &['ב', 'ו'],
    &['כ', 'ח', 'ק'],
    &['ט', 'ת'],
    &['ס', 'ש'],
];

static REPRESENTATIVES: LazyLock<AHashMap<char, char>> = LazyLock::new(|| {
    let mut map = AHashMap::new();
    for class in PHONETIC_CLASSES {
        let representative = class[0];
        for &letter in *class {
            map.insert(letter, representative);
        }
    }
    map
});

/// Representative letter of `letter`'s class (the letter itself if unclassed).
pub fn representative(letter: char) -> char {
    REPRESENTATIVES.get(&letter).copied().unwrap_or(letter)
}

/// Phonetic key of an already normalized word.
pub fn phonetic_key_normalized(word: &str) -> String {
    word.chars().map(representative).collect()
}

/// Phonetic key of a word.
///
/// ```
/// use mafteah::lexicon::phonetic::phonetic_key;
///
/// assert_eq!(phonetic_key("כתב"), phonetic_key("חטב"));
/// ```
pub fn phonetic_key(word: &str) -> String {
    phonetic_key_normalized(&normalize(word))
}

/// Whether two words collapse to the same phonetic key.
pub fn sounds_alike(a: &str, b: &str) -> bool {
    phonetic_key(a) == phonetic_key(b)
}
