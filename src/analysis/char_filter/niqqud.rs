//! Niqqud and cantillation removal.

use unicode_normalization::char::decompose_canonical;

use super::CharFilter;

/// Check whether a code point is a Hebrew point or cantillation mark.
///
/// Covers accents (U+0591..U+05AF), vowel points (U+05B0..U+05BD), rafe,
/// shin/sin dots, upper/lower dots and qamats qatan. Punctuation in the block
/// (maqaf, paseq, sof pasuq, nun hafukha) is kept.
pub fn is_niqqud(ch: char) -> bool {
    matches!(ch,
        '\u{0591}'..='\u{05BD}'
            | '\u{05BF}'
            | '\u{05C1}'..='\u{05C2}'
            | '\u{05C4}'..='\u{05C5}'
            | '\u{05C7}')
}

/// Alphabetic presentation forms that carry a point in the glyph itself
/// (e.g. U+FB2A SHIN WITH SHIN DOT).
fn is_presentation_form(ch: char) -> bool {
    matches!(ch, '\u{FB1D}'..='\u{FB4E}')
}

/// Removes niqqud (vowel points) and cantillation marks.
///
/// Precomposed presentation forms are canonically decomposed first so their
/// marks are removed along with the free-standing ones.
#[derive(Clone, Debug, Default)]
pub struct NiqqudCharFilter;

impl NiqqudCharFilter {
    pub fn new() -> Self {
        NiqqudCharFilter
    }
}

impl CharFilter for NiqqudCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        for ch in input.chars() {
            if is_presentation_form(ch) {
                decompose_canonical(ch, |c| {
                    if !is_niqqud(c) {
                        output.push(c);
                    }
                });
            } else if !is_niqqud(ch) {
                output.push(ch);
            }
        }
        output
    }

    fn name(&self) -> &'static str {
        "niqqud"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_vowels() {
        let filter = NiqqudCharFilter::new();
        assert_eq!(filter.filter("שָׁלוֹם"), "שלום");
        assert_eq!(filter.filter("בְּרֵאשִׁית"), "בראשית");
    }

    #[test]
    fn test_remove_cantillation() {
        let filter = NiqqudCharFilter::new();
        // bereshit with etnachta and munach
        assert_eq!(filter.filter("בְּרֵאשִׁ֖ית בָּרָ֣א"), "בראשית ברא");
    }

    #[test]
    fn test_presentation_forms() {
        let filter = NiqqudCharFilter::new();
        // U+FB2A shin with shin dot, U+FB4B vav with holam
        assert_eq!(filter.filter("\u{FB2A}ל\u{FB4B}ם"), "שלום");
    }

    #[test]
    fn test_keeps_punctuation_and_latin() {
        let filter = NiqqudCharFilter::new();
        assert_eq!(filter.filter("בית־דין, Case 12"), "בית־דין, Case 12");
        assert_eq!(filter.filter(""), "");
    }
}
