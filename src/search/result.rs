//! Search result types.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// How a term matched a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Fuzzy,
    Phonetic,
    Partial,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatchType::Exact => "exact",
            MatchType::Fuzzy => "fuzzy",
            MatchType::Phonetic => "phonetic",
            MatchType::Partial => "partial",
        };
        f.write_str(name)
    }
}

/// One ranked document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub doc_id: String,
    pub score: f64,
    /// Terms that contributed to the score, in first-match order.
    pub matched_terms: Vec<String>,
    /// Distinct match kinds, sorted.
    pub match_types: Vec<MatchType>,
    /// Body sentences containing a match.
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl SearchResult {
    pub fn new<S: Into<String>>(doc_id: S, score: f64) -> Self {
        SearchResult {
            doc_id: doc_id.into(),
            score,
            matched_terms: Vec::new(),
            match_types: Vec::new(),
            highlights: Vec::new(),
        }
    }

    pub fn has_match_type(&self, match_type: MatchType) -> bool {
        self.match_types.contains(&match_type)
    }
}

/// Best first. Ties keep their relative order when used with a stable sort.
pub(crate) fn by_score_desc(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

/// Accumulates one document's contributions while scoring.
#[derive(Debug, Default)]
pub(crate) struct ScoreAccumulator {
    pub(crate) score: f64,
    matched_terms: Vec<String>,
    match_types: Vec<MatchType>,
}

impl ScoreAccumulator {
    pub(crate) fn add(&mut self, term: &str, match_type: MatchType, score: f64) {
        self.score += score;
        if !self.matched_terms.iter().any(|t| t == term) {
            self.matched_terms.push(term.to_string());
        }
        if !self.match_types.contains(&match_type) {
            self.match_types.push(match_type);
        }
    }

    pub(crate) fn into_result(mut self, doc_id: String) -> SearchResult {
        self.match_types.sort();
        SearchResult {
            doc_id,
            score: self.score,
            matched_terms: self.matched_terms,
            match_types: self.match_types,
            highlights: Vec::new(),
        }
    }
}
