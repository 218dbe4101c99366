//! Ranked search over a [`SearchIndex`].
//!
//! Every expanded query term contributes through up to four additive stages:
//! exact TF-IDF, fuzzy (edit-distance) matches against the vocabulary,
//! phonetic matches and shared n-grams. Results are sorted best first with
//! ties in insertion order.

use std::collections::BTreeMap;

use ahash::AHashSet;

use crate::index::inverted::SearchIndex;
use crate::lexicon::phonetic::phonetic_key_normalized;
use crate::query::expander::ExpandedQuery;
use crate::search::result::{MatchType, ScoreAccumulator, SearchResult, by_score_desc};
use crate::util::levenshtein::similarity_at_least;

/// Weight of a fuzzy match relative to an exact one.
pub const FUZZY_WEIGHT: f64 = 0.5;
/// Weight of a phonetic match relative to an exact one.
pub const PHONETIC_WEIGHT: f64 = 0.7;
/// Score added per shared distinct n-gram.
pub const PARTIAL_WEIGHT: f64 = 0.1;
/// Shortest term considered for fuzzy matching.
pub const MIN_FUZZY_TERM_LEN: usize = 3;

type Accumulators = BTreeMap<usize, ScoreAccumulator>;

impl SearchIndex {
    /// Expand `query` the way [`search`](Self::search) does.
    pub fn expand(&self, query: &str) -> ExpandedQuery {
        self.expander.expand(query)
    }

    /// Up to `max_results` documents matching `query`, best first.
    pub fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        if self.is_empty() || max_results == 0 {
            return Vec::new();
        }
        let expanded = self.expand(query);
        self.search_expanded(&expanded, max_results)
    }

    /// Rank documents against an already expanded query.
    pub fn search_expanded(&self, query: &ExpandedQuery, max_results: usize) -> Vec<SearchResult> {
        if self.is_empty() || query.is_empty() || max_results == 0 {
            return Vec::new();
        }

        let mut accumulators = Accumulators::new();
        for term in &query.terms {
            self.score_term(term, query.is_original(term), &mut accumulators);
        }

        // Slot order is insertion order; the stable sort keeps it for ties.
        let mut results: Vec<SearchResult> = accumulators
            .into_iter()
            .map(|(slot, acc)| acc.into_result(self.documents[slot].document.id.clone()))
            .collect();
        results.sort_by(by_score_desc);
        results.truncate(max_results);

        for result in &mut results {
            if let Some(document) = self.document(&result.doc_id) {
                result.highlights = self
                    .highlighter
                    .highlight(&document.body, &result.matched_terms);
            }
        }

        log::debug!(
            "query {:?}: {} terms, {} results",
            query.original,
            query.len(),
            results.len()
        );
        results
    }

    fn score_term(&self, term: &str, is_original: bool, accumulators: &mut Accumulators) {
        let scoring = &self.config.scoring;
        let term_len = term.chars().count();

        if let Some(postings) = self.inverted.get(term) {
            let idf = self.inverse_document_frequency(term);
            for &slot in postings {
                let document = &self.documents[slot];
                let mut score = document.term_frequency(term) * idf;
                if document.title_contains(term) {
                    score *= scoring.title_boost;
                }
                if is_original {
                    score *= scoring.exact_match_boost;
                }
                accumulators
                    .entry(slot)
                    .or_default()
                    .add(term, MatchType::Exact, score);
            }
        }

        if scoring.enable_fuzzy && term_len >= MIN_FUZZY_TERM_LEN {
            for (candidate, similarity) in self.fuzzy_candidates(term, scoring.fuzzy_threshold) {
                self.add_weighted(candidate, MatchType::Fuzzy, similarity * FUZZY_WEIGHT, accumulators);
            }
        }

        if scoring.enable_phonetic {
            if let Some(terms) = self.phonetic_index.get(&phonetic_key_normalized(term)) {
                let mut candidates: Vec<&String> = terms.iter().filter(|c| *c != term).collect();
                candidates.sort();
                for candidate in candidates {
                    self.add_weighted(candidate, MatchType::Phonetic, PHONETIC_WEIGHT, accumulators);
                }
            }
        }

        let ngram_size = self.ngram_tokenizer.size();
        if scoring.enable_partial && self.config.index.enable_ngrams && term_len >= ngram_size {
            let mut seen = AHashSet::new();
            for ngram in self.ngram_tokenizer.ngrams(term) {
                if !seen.insert(ngram.clone()) {
                    continue;
                }
                if let Some(postings) = self.ngram_index.get(&ngram) {
                    for &slot in postings {
                        accumulators
                            .entry(slot)
                            .or_default()
                            .add(term, MatchType::Partial, PARTIAL_WEIGHT);
                    }
                }
            }
        }
    }

    /// Add `weight · tf · idf` of `candidate` to every document containing it.
    fn add_weighted(
        &self,
        candidate: &str,
        match_type: MatchType,
        weight: f64,
        accumulators: &mut Accumulators,
    ) {
        let Some(postings) = self.inverted.get(candidate) else {
            return;
        };
        let idf = self.inverse_document_frequency(candidate);
        for &slot in postings {
            let score = weight * self.documents[slot].term_frequency(candidate) * idf;
            accumulators
                .entry(slot)
                .or_default()
                .add(candidate, match_type, score);
        }
    }

    /// Vocabulary terms other than `term` whose similarity reaches
    /// `threshold`, sorted by term.
    pub(crate) fn fuzzy_candidates(&self, term: &str, threshold: f64) -> Vec<(&str, f64)> {
        let term_len = term.chars().count();

        let shortlist: Vec<&String> = if self.qgram_shortlist_is_complete(term_len, threshold) {
            let mut shortlist = AHashSet::new();
            for ngram in self.ngram_tokenizer.ngrams(term) {
                if let Some(terms) = self.term_ngrams.get(&ngram) {
                    shortlist.extend(terms.iter());
                }
            }
            shortlist.into_iter().collect()
        } else {
            self.inverted.keys().collect()
        };

        let (min_len, max_len) = length_window(term_len, threshold);
        let mut candidates: Vec<(&str, f64)> = shortlist
            .into_iter()
            .filter(|candidate| candidate.as_str() != term)
            .filter(|candidate| {
                let len = candidate.chars().count();
                len >= min_len && len <= max_len
            })
            .filter_map(|candidate| {
                similarity_at_least(term, candidate, threshold).map(|s| (candidate.as_str(), s))
            })
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(b.0));
        candidates
    }

    /// Whether every term within the similarity threshold must share at
    /// least one n-gram with a term of `term_len` characters.
    ///
    /// With `k` edits allowed, at least `term_len - q + 1 - k·q` of the
    /// term's q-grams survive in any match.
    fn qgram_shortlist_is_complete(&self, term_len: usize, threshold: f64) -> bool {
        if threshold <= 0.0 {
            return false;
        }
        let q = self.ngram_tokenizer.size();
        if term_len < q {
            return false;
        }
        let max_edits = ((1.0 - threshold) * term_len as f64 / threshold + 1e-9).floor() as usize;
        term_len + 1 > q + max_edits * q
    }
}

/// Candidate lengths that can reach `threshold` against a term of `term_len`
/// characters.
fn length_window(term_len: usize, threshold: f64) -> (usize, usize) {
    if threshold <= 0.0 {
        return (0, usize::MAX);
    }
    let min_len = (term_len as f64 * threshold - 1e-9).ceil().max(0.0) as usize;
    let max_len = (term_len as f64 / threshold + 1e-9).floor() as usize;
    (min_len, max_len)
}
