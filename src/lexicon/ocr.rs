//! OCR confusion patterns for scanned Hebrew text.
//!
//! Letters that print similarly are frequently swapped by OCR engines. The
//! single-letter pairs are symmetric; the multi-letter patterns are one-way
//! find/replace corrections.

use std::sync::LazyLock;

use crate::analysis::normalizer::normalize;

/// Visually confusable letter pairs. Final forms are folded during
/// normalization, so ם/ס appears here as מ/ס.
const CONFUSABLE_LETTERS: &[(char, char)] = &[
    ('ה', 'ח'),
    ('ח', 'ת'),
    ('ד', 'ר'),
    ('ו', 'י'),
    ('ו', 'ז'),
    ('ב', 'כ'),
    ('ס', 'מ'),
    ('ע', 'צ'),
    ('ג', 'נ'),
];

/// Multi-letter misreadings: (as scanned, corrected).
const PATTERN_CORRECTIONS: &[(&str, &str)] = &[("וו", "ו"), ("יי", "י")];

static SUBSTITUTIONS: LazyLock<Vec<(String, String)>> = LazyLock::new(|| {
    let mut substitutions = Vec::new();
    for &(a, b) in CONFUSABLE_LETTERS {
        substitutions.push((a.to_string(), b.to_string()));
        substitutions.push((b.to_string(), a.to_string()));
    }
    for &(find, replace) in PATTERN_CORRECTIONS {
        substitutions.push((normalize(find), normalize(replace)));
    }
    substitutions
});

/// Every variant produced by applying one confusion pattern to `word`.
///
/// Each pattern replaces all of its occurrences at once. The word itself is
/// never part of the result; variants are unique and in pattern order.
pub fn ocr_variants(word: &str) -> Vec<String> {
    let word = normalize(word);
    let mut variants: Vec<String> = Vec::new();
    if word.is_empty() {
        return variants;
    }

    for (find, replace) in SUBSTITUTIONS.iter() {
        if word.contains(find.as_str()) {
            let variant = word.replace(find.as_str(), replace);
            if variant != word && !variants.contains(&variant) {
                variants.push(variant);
            }
        }
    }

    variants
}

/// The letters an OCR engine may confuse with `letter`.
pub fn confusable_with(letter: char) -> Vec<char> {
    CONFUSABLE_LETTERS
        .iter()
        .filter_map(|&(a, b)| {
            if a == letter {
                Some(b)
            } else if b == letter {
                Some(a)
            } else {
                None
            }
        })
        .collect()
}
