//! Final letter (sofit) folding.

use super::CharFilter;

/// Map a final letter form to its base letter; other characters pass through.
pub fn fold_sofit(ch: char) -> char {
    match ch {
        'ך' => 'כ',
        'ם' => 'מ',
        'ן' => 'נ',
        'ף' => 'פ',
        'ץ' => 'צ',
        other => other,
    }
}

/// Folds the five final letter forms to their base letters.
///
/// Folding is position-independent: a final form in the middle of a word is
/// folded too.
#[derive(Clone, Debug, Default)]
pub struct SofitCharFilter;

impl SofitCharFilter {
    pub fn new() -> Self {
        SofitCharFilter
    }
}

impl CharFilter for SofitCharFilter {
    fn filter(&self, input: &str) -> String {
        input.chars().map(fold_sofit).collect()
    }

    fn name(&self) -> &'static str {
        "sofit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_final_letter() {
        let filter = SofitCharFilter::new();
        assert_eq!(filter.filter("ךםןףץ"), "כמנפצ");
        assert_eq!(filter.filter("שלום"), "שלומ");
    }

    #[test]
    fn test_base_letters_unchanged() {
        let filter = SofitCharFilter::new();
        assert_eq!(filter.filter("כמנפצ"), "כמנפצ");
        assert_eq!(filter.filter("abc"), "abc");
    }
}
