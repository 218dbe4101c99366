//! Prefix suggestions from the index vocabulary.

use crate::analysis::normalizer::normalize;
use crate::index::inverted::SearchIndex;

impl SearchIndex {
    /// Up to `max` vocabulary terms starting with `prefix`, most frequent
    /// first, ties in alphabetical order.
    pub fn get_suggestions(&self, prefix: &str, max: usize) -> Vec<String> {
        let prefix = normalize(prefix);
        if prefix.is_empty() || max == 0 {
            return Vec::new();
        }

        let mut matches: Vec<(&String, usize)> = self
            .inverted
            .keys()
            .filter(|term| term.starts_with(prefix.as_str()))
            .map(|term| (term, self.term_count(term)))
            .collect();
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        matches
            .into_iter()
            .take(max)
            .map(|(term, _)| term.clone())
            .collect()
    }
}
