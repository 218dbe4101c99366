//! Batched linear scan over a document list.
//!
//! Unlike [`SearchIndex`](crate::index::SearchIndex), the streaming scanner
//! needs no index: each document is checked with substring containment and a
//! per-token fuzzy fallback, and matches are reported in batches so a caller
//! can render results while the scan is still running.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::analysis::tokenizer::hebrew::tokenize;
use crate::config::EngineConfig;
use crate::error::{MafteahError, Result};
use crate::index::document::Document;
use crate::query::expander::{ExpandedQuery, QueryExpander};
use crate::search::highlight::Highlighter;
use crate::search::result::{MatchType, ScoreAccumulator, SearchResult, by_score_desc};
use crate::search::scorer::{FUZZY_WEIGHT, MIN_FUZZY_TERM_LEN};
use crate::util::levenshtein::similarity_at_least;

/// One batch of streamed matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamBatch {
    /// Matches found since the previous batch, best first.
    pub results: Vec<SearchResult>,
    /// Documents scanned so far.
    pub processed: usize,
    pub total: usize,
    pub percentage: f64,
    pub is_final: bool,
}

/// Totals reported once the scan finishes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamSummary {
    pub scanned: usize,
    pub total_found: usize,
    pub elapsed: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StreamEvent {
    Batch(StreamBatch),
    Complete(StreamSummary),
}

/// Linear scanner emitting batched results.
#[derive(Clone, Debug)]
pub struct StreamingSearch {
    config: EngineConfig,
    expander: QueryExpander,
    highlighter: Highlighter,
}

impl Default for StreamingSearch {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl StreamingSearch {
    pub fn new(config: EngineConfig) -> Self {
        let expander = QueryExpander::new(config.expansion.clone())
            .with_pseudo_root_policy(config.pseudo_root)
            .with_stop_word_removal(config.index.remove_stop_words);
        let highlighter = Highlighter::new(config.highlight.clone());
        StreamingSearch {
            config,
            expander,
            highlighter,
        }
    }

    /// Scan `documents` for `query`, passing each batch and the final
    /// summary to `sink`.
    ///
    /// Exactly one batch has `is_final` set, even when nothing matched. The
    /// `cancel` flag is checked before each batch; once it is set the scan
    /// stops with [`MafteahError::OperationCancelled`].
    pub fn run<F>(
        &self,
        documents: &[Document],
        query: &str,
        batch_size: usize,
        cancel: &AtomicBool,
        mut sink: F,
    ) -> Result<StreamSummary>
    where
        F: FnMut(StreamEvent),
    {
        let start = Instant::now();
        let batch_size = batch_size.max(1);
        let total = documents.len();
        let expanded = self.expander.expand(query);

        let mut batch: Vec<SearchResult> = Vec::new();
        let mut total_found = 0;
        let mut scanned = 0;
        let mut final_emitted = false;

        for (i, document) in documents.iter().enumerate() {
            if batch.is_empty() && cancel.load(Ordering::Relaxed) {
                return Err(MafteahError::cancelled(format!(
                    "streaming search cancelled after {scanned} of {total} documents"
                )));
            }

            scanned = i + 1;
            if let Some(result) = self.match_document(document, &expanded) {
                batch.push(result);
                total_found += 1;
            }

            if batch.len() >= batch_size {
                let is_final = scanned == total;
                sink(StreamEvent::Batch(make_batch(
                    std::mem::take(&mut batch),
                    scanned,
                    total,
                    is_final,
                )));
                final_emitted = is_final;
                log::debug!("streamed batch at {scanned}/{total}");
            }
        }

        if !final_emitted {
            sink(StreamEvent::Batch(make_batch(batch, scanned, total, true)));
        }

        let summary = StreamSummary {
            scanned,
            total_found,
            elapsed: start.elapsed(),
        };
        sink(StreamEvent::Complete(summary));
        Ok(summary)
    }

    /// Every match in `documents`, best first, without batching.
    pub fn scan_all(&self, documents: &[Document], query: &str) -> Vec<SearchResult> {
        let expanded = self.expander.expand(query);
        let mut results: Vec<SearchResult> = documents
            .iter()
            .filter_map(|document| self.match_document(document, &expanded))
            .collect();
        results.sort_by(by_score_desc);
        results
    }

    /// Score one document against an expanded query.
    pub fn match_document(&self, document: &Document, query: &ExpandedQuery) -> Option<SearchResult> {
        if query.is_empty() {
            return None;
        }

        let scoring = &self.config.scoring;
        let title = normalize(&document.title);
        let body = normalize(&document.body);
        let mut tokens: Option<Vec<String>> = None;
        let mut acc = ScoreAccumulator::default();
        let mut matched = false;

        for term in &query.terms {
            let mut found = false;
            if title.contains(term.as_str()) {
                acc.add(term, MatchType::Exact, scoring.title_boost);
                found = true;
            }
            let occurrences = body.matches(term.as_str()).count();
            if occurrences > 0 {
                let boost = if query.is_original(term) {
                    scoring.exact_match_boost
                } else {
                    1.0
                };
                acc.add(term, MatchType::Exact, occurrences as f64 * boost);
                found = true;
            }

            if !found && scoring.enable_fuzzy && term.chars().count() >= MIN_FUZZY_TERM_LEN {
                let tokens = tokens.get_or_insert_with(|| {
                    let mut tokens = tokenize(&body);
                    tokens.extend(tokenize(&title));
                    tokens
                });
                let best = tokens
                    .iter()
                    .filter_map(|token| similarity_at_least(term, token, scoring.fuzzy_threshold))
                    .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))));
                if let Some(similarity) = best {
                    acc.add(term, MatchType::Fuzzy, similarity * FUZZY_WEIGHT);
                    found = true;
                }
            }

            matched |= found;
        }

        if !matched {
            return None;
        }
        let mut result = acc.into_result(document.id.clone());
        result.highlights = self
            .highlighter
            .highlight(&document.body, &result.matched_terms);
        Some(result)
    }
}

fn make_batch(
    mut results: Vec<SearchResult>,
    processed: usize,
    total: usize,
    is_final: bool,
) -> StreamBatch {
    results.sort_by(by_score_desc);
    let percentage = if total == 0 {
        100.0
    } else {
        processed as f64 / total as f64 * 100.0
    };
    StreamBatch {
        results,
        processed,
        total,
        percentage,
        is_final,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Document> {
        vec![
            Document::new("1", "דיני חוזים", "החוזה נחתם בין הצדדים"),
            Document::new("2", "", "מזג האוויר נאה"),
            Document::new("3", "", "הפרת חוזה גוררת פיצוי. החוזה בוטל."),
            Document::new("4", "", "אין כאן דבר"),
            Document::new("5", "חוזה", ""),
        ]
    }

    fn collect(
        search: &StreamingSearch,
        docs: &[Document],
        query: &str,
        batch_size: usize,
    ) -> (Vec<StreamBatch>, StreamSummary) {
        let cancel = AtomicBool::new(false);
        let mut batches = Vec::new();
        let mut complete = None;
        search
            .run(docs, query, batch_size, &cancel, |event| match event {
                StreamEvent::Batch(batch) => batches.push(batch),
                StreamEvent::Complete(summary) => complete = Some(summary),
            })
            .unwrap();
        (batches, complete.unwrap())
    }

    #[test]
    fn test_batches() {
        let search = StreamingSearch::default();
        let docs = corpus();
        let (batches, summary) = collect(&search, &docs, "חוזה", 2);

        assert_eq!(summary.scanned, 5);
        assert_eq!(summary.total_found, 3);
        assert_eq!(batches.iter().filter(|b| b.is_final).count(), 1);
        assert!(batches.last().unwrap().is_final);
        assert_eq!(batches.last().unwrap().percentage, 100.0);

        let streamed: usize = batches.iter().map(|b| b.results.len()).sum();
        assert_eq!(streamed, 3);
        for batch in &batches {
            assert!(batch.results.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_union_equals_scan_all() {
        let search = StreamingSearch::default();
        let docs = corpus();
        for batch_size in [0, 1, 2, 3, 10] {
            let (batches, _) = collect(&search, &docs, "חוזה", batch_size);
            let mut streamed: Vec<String> = batches
                .into_iter()
                .flat_map(|b| b.results)
                .map(|r| r.doc_id)
                .collect();
            let mut all: Vec<String> = search
                .scan_all(&docs, "חוזה")
                .into_iter()
                .map(|r| r.doc_id)
                .collect();
            streamed.sort();
            all.sort();
            assert_eq!(streamed, all, "batch size {batch_size}");
        }
    }

    #[test]
    fn test_title_and_occurrence_scoring() {
        let search = StreamingSearch::new(EngineConfig {
            expansion: crate::config::ExpansionConfig::none(),
            ..EngineConfig::default()
        });
        let results = search.scan_all(&corpus(), "חוזה");
        let score = |id: &str| results.iter().find(|r| r.doc_id == id).unwrap().score;
        // Two body occurrences of an original token: 2 × 1.5.
        assert!((score("3") - 3.0).abs() < 1e-12);
        // Title only: title boost.
        assert!((score("5") - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_fuzzy_fallback() {
        let search = StreamingSearch::new(EngineConfig {
            expansion: crate::config::ExpansionConfig::none(),
            ..EngineConfig::default()
        });
        let docs = vec![Document::new("1", "", "המחוקק קבע")];
        let results = search.scan_all(&docs, "המחוקקת");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_types, vec![MatchType::Fuzzy]);
    }

    #[test]
    fn test_empty_inputs() {
        let search = StreamingSearch::default();
        let (batches, summary) = collect(&search, &[], "חוזה", 5);
        assert_eq!(batches.len(), 1);
        assert!(batches[0].is_final);
        assert!(batches[0].results.is_empty());
        assert_eq!(summary.scanned, 0);

        let (batches, summary) = collect(&search, &corpus(), "", 5);
        assert_eq!(summary.total_found, 0);
        assert_eq!(batches.len(), 1);
    }

    #[test]
    fn test_cancel() {
        let search = StreamingSearch::default();
        let cancel = AtomicBool::new(true);
        let mut events = 0;
        let result = search.run(&corpus(), "חוזה", 1, &cancel, |_| events += 1);
        assert!(matches!(result, Err(MafteahError::OperationCancelled(_))));
        assert_eq!(events, 0);
    }

    #[test]
    fn test_cancel_between_batches() {
        let search = StreamingSearch::default();
        let cancel = AtomicBool::new(false);
        let mut batches = 0;
        let result = search.run(&corpus(), "חוזה", 1, &cancel, |event| {
            if let StreamEvent::Batch(_) = event {
                batches += 1;
                cancel.store(true, Ordering::Relaxed);
            }
        });
        assert!(result.unwrap_err().is_cancelled());
        assert_eq!(batches, 1);
    }
}
