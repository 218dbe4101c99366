//! Hebrew text normalization.
//!
//! Normalization is an ordered pipeline of [`CharFilter`]s:
//!
//! ```text
//! raw text → niqqud removal → sofit folding → case folding → whitespace collapse
//! ```
//!
//! The order matters: points must be gone before letters are compared or
//! folded, otherwise a pointed final letter would survive folding.
//!
//! Normalization is idempotent: `normalize(&normalize(s)) == normalize(s)`.

use std::sync::LazyLock;

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::case_fold::CaseFoldCharFilter;
use crate::analysis::char_filter::niqqud::NiqqudCharFilter;
use crate::analysis::char_filter::sofit::SofitCharFilter;
use crate::analysis::char_filter::whitespace::WhitespaceCharFilter;

static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(Normalizer::new);

/// An ordered chain of char filters.
pub struct Normalizer {
    filters: Vec<Box<dyn CharFilter>>,
}

impl Normalizer {
    /// The standard Hebrew search pipeline.
    pub fn new() -> Self {
        Normalizer {
            filters: vec![
                Box::new(NiqqudCharFilter::new()),
                Box::new(SofitCharFilter::new()),
                Box::new(CaseFoldCharFilter::new()),
                Box::new(WhitespaceCharFilter::new()),
            ],
        }
    }

    /// Build a normalizer from a custom filter chain.
    pub fn with_filters(filters: Vec<Box<dyn CharFilter>>) -> Self {
        Normalizer { filters }
    }

    /// Names of the filters in application order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run the whole chain over `text`.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = text.to_string();
        for filter in &self.filters {
            current = filter.filter(&current);
        }
        current
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize text for search: strip niqqud, fold final letters, lowercase,
/// collapse whitespace.
///
/// ```
/// use mafteah::analysis::normalizer::normalize;
///
/// assert_eq!(normalize("  שָׁלוֹם   Olam "), "שלומ olam");
/// ```
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

/// Normalize an optional value; absent input is treated as empty text.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Remove niqqud and cantillation only.
pub fn remove_niqqud(text: &str) -> String {
    NiqqudCharFilter::new().filter(text)
}

/// Fold final letters only.
pub fn normalize_sofit(text: &str) -> String {
    SofitCharFilter::new().filter(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_order() {
        let normalizer = Normalizer::new();
        assert_eq!(
            normalizer.filter_names(),
            vec!["niqqud", "sofit", "case_fold", "whitespace"]
        );
    }

    #[test]
    fn test_normalize_examples() {
        assert_eq!(normalize_sofit("שלום"), "שלומ");
        assert_eq!(remove_niqqud("שָׁלוֹם"), "שלום");
        assert_eq!(normalize("שָׁלוֹם"), "שלומ");
        assert_eq!(normalize("  Rabbi   יוֹחָנָן "), "rabbi יוחננ");
    }

    #[test]
    fn test_pointed_final_letter() {
        // final kaf with qamats: the point must not block folding
        assert_eq!(normalize("לְךָ"), "לכ");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "   ",
            "בְּרֵאשִׁית בָּרָא אֱלֹהִים",
            "רמב\"ם, הלכות דעות",
            "Mixed CASE עִם ניקוד\tו-tabs",
            "\u{FB2A}ל\u{FB4B}ם",
            "İstanbul ﬁ",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_normalize_opt() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("ספר")), "ספר");
    }
}
