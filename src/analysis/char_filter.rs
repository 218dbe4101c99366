//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw string before it is tokenized. Each step of
//! the Hebrew normalization pipeline is one filter, and
//! [`crate::analysis::normalizer::Normalizer`] chains them in a fixed order.
//!
//! # Available Filters
//!
//! - [`niqqud::NiqqudCharFilter`] - Removes vowel points and cantillation marks
//! - [`sofit::SofitCharFilter`] - Folds final letter forms to their base letters
//! - [`case_fold::CaseFoldCharFilter`] - Lowercases non-Hebrew characters
//! - [`whitespace::WhitespaceCharFilter`] - Collapses and trims whitespace
//!
//! # Examples
//!
//! ```
//! use mafteah::analysis::char_filter::CharFilter;
//! use mafteah::analysis::char_filter::sofit::SofitCharFilter;
//!
//! let filter = SofitCharFilter::new();
//! assert_eq!(filter.filter("שלום"), "שלומ");
//! ```

/// Trait for character filters that transform text before tokenization.
///
/// Filters are pure: the same input always produces the same output, and
/// applying a filter to its own output changes nothing.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod case_fold;
pub mod niqqud;
pub mod sofit;
pub mod whitespace;
