//! Whitespace collapsing.

use super::CharFilter;

/// Collapses runs of whitespace into a single space and trims both ends.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceCharFilter;

impl WhitespaceCharFilter {
    pub fn new() -> Self {
        WhitespaceCharFilter
    }
}

impl CharFilter for WhitespaceCharFilter {
    fn filter(&self, input: &str) -> String {
        input.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
