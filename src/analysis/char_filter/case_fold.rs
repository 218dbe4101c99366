//! Case folding for non-Hebrew text.

use super::CharFilter;

/// Lowercases every character. Hebrew has no case, so only Latin (and other
/// cased scripts) embedded in the text are affected.
#[derive(Clone, Debug, Default)]
pub struct CaseFoldCharFilter;

impl CaseFoldCharFilter {
    pub fn new() -> Self {
        CaseFoldCharFilter
    }
}

impl CharFilter for CaseFoldCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "case_fold"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_script() {
        let filter = CaseFoldCharFilter::new();
        assert_eq!(filter.filter("Case ABC נגד Israel"), "case abc נגד israel");
    }
}
