//! In-memory inverted index with n-gram, phonetic and frequency side tables.
//!
//! Documents live in slots; a slot number is stable for the lifetime of the
//! document and doubles as the posting value. Re-adding a document with a
//! known id reuses its slot and replaces its postings.

use std::collections::BTreeSet;

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::hebrew::tokenize;
use crate::analysis::tokenizer::ngram::NgramTokenizer;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::index::document::Document;
use crate::lexicon::phonetic::phonetic_key_normalized;
use crate::lexicon::stop_words::is_stop_word;
use crate::query::expander::QueryExpander;
use crate::search::highlight::Highlighter;

/// Index size counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_documents: usize,
    /// Indexed tokens across all documents (stop words excluded).
    pub total_words: usize,
    /// Distinct indexed terms.
    pub unique_words: usize,
    /// Distinct n-grams.
    pub ngram_count: usize,
}

/// A document together with its analysis.
#[derive(Clone, Debug)]
pub(crate) struct IndexedDocument {
    pub(crate) document: Document,
    /// Body and title tokens that survived stop-word removal, in order.
    pub(crate) tokens: Vec<String>,
    pub(crate) title_tokens: Vec<String>,
    /// Distinct n-grams of every token, stop words included.
    pub(crate) ngrams: Vec<String>,
}

impl IndexedDocument {
    /// Term frequency by substring containment: the share of tokens that
    /// equal or contain `term`.
    pub(crate) fn term_frequency(&self, term: &str) -> f64 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        let hits = self.tokens.iter().filter(|t| t.contains(term)).count();
        hits as f64 / self.tokens.len() as f64
    }

    pub(crate) fn title_contains(&self, term: &str) -> bool {
        self.title_tokens.iter().any(|t| t.contains(term))
    }
}

/// The search index.
pub struct SearchIndex {
    pub(crate) config: EngineConfig,
    pub(crate) expander: QueryExpander,
    pub(crate) highlighter: Highlighter,
    pub(crate) ngram_tokenizer: NgramTokenizer,
    pub(crate) documents: Vec<IndexedDocument>,
    pub(crate) slots: AHashMap<String, usize>,
    /// term → slots of the documents containing it.
    pub(crate) inverted: AHashMap<String, BTreeSet<usize>>,
    /// n-gram → slots.
    pub(crate) ngram_index: AHashMap<String, BTreeSet<usize>>,
    /// n-gram → vocabulary terms containing it.
    pub(crate) term_ngrams: AHashMap<String, AHashSet<String>>,
    /// phonetic key → vocabulary terms.
    pub(crate) phonetic_index: AHashMap<String, AHashSet<String>>,
    /// Occurrences seen per term. Counts are never decremented.
    pub(crate) frequencies: AHashMap<String, usize>,
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("documents", &self.documents.len())
            .field("terms", &self.inverted.len())
            .field("ngrams", &self.ngram_index.len())
            .finish()
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SearchIndex {
    /// Create an empty index. Fails if `config` does not validate.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let ngram_tokenizer = NgramTokenizer::new(config.index.ngram_size)?;
        Ok(Self::assemble(config, ngram_tokenizer))
    }

    /// Empty index with the default configuration.
    pub fn with_defaults() -> Self {
        Self::assemble(EngineConfig::default(), NgramTokenizer::trigram())
    }

    fn assemble(config: EngineConfig, ngram_tokenizer: NgramTokenizer) -> Self {
        let expander = QueryExpander::new(config.expansion.clone())
            .with_pseudo_root_policy(config.pseudo_root)
            .with_stop_word_removal(config.index.remove_stop_words);
        let highlighter = Highlighter::new(config.highlight.clone());

        SearchIndex {
            config,
            expander,
            highlighter,
            ngram_tokenizer,
            documents: Vec::new(),
            slots: AHashMap::new(),
            inverted: AHashMap::new(),
            ngram_index: AHashMap::new(),
            term_ngrams: AHashMap::new(),
            phonetic_index: AHashMap::new(),
            frequencies: AHashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the index contents with `documents`.
    ///
    /// Analysis runs in parallel; postings are merged in input order, so a
    /// later duplicate id replaces an earlier one.
    pub fn build_index(&mut self, documents: Vec<Document>) -> IndexStats {
        self.clear();
        let analyzed: Vec<IndexedDocument> = documents
            .into_par_iter()
            .map(|document| self.analyze(document))
            .collect();

        for indexed in analyzed {
            self.insert(indexed);
        }

        let stats = self.get_stats();
        log::info!(
            "indexed {} documents ({} unique terms, {} n-grams)",
            stats.total_documents,
            stats.unique_words,
            stats.ngram_count
        );
        stats
    }

    /// Add one document, replacing any document with the same id.
    pub fn add_document(&mut self, document: Document) {
        let indexed = self.analyze(document);
        self.insert(indexed);
    }

    /// Drop every document and side table.
    pub fn clear(&mut self) {
        self.documents.clear();
        self.slots.clear();
        self.inverted.clear();
        self.ngram_index.clear();
        self.term_ngrams.clear();
        self.phonetic_index.clear();
        self.frequencies.clear();
        log::debug!("index cleared");
    }

    pub fn get_stats(&self) -> IndexStats {
        IndexStats {
            total_documents: self.documents.len(),
            total_words: self.documents.iter().map(|d| d.tokens.len()).sum(),
            unique_words: self.inverted.len(),
            ngram_count: self.ngram_index.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The stored document with `id`.
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.slots.get(id).map(|&slot| &self.documents[slot].document)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().map(|d| &d.document)
    }

    /// Whether `term` (already normalized) is in the vocabulary.
    pub fn contains_term(&self, term: &str) -> bool {
        self.inverted.contains_key(term)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.inverted.get(term).map_or(0, BTreeSet::len)
    }

    /// Occurrences recorded for `term`.
    pub fn term_count(&self, term: &str) -> usize {
        self.frequencies.get(term).copied().unwrap_or(0)
    }

    /// `ln(N / df)`, or 0 for an unknown term.
    pub(crate) fn inverse_document_frequency(&self, term: &str) -> f64 {
        let df = self.document_frequency(term);
        if df == 0 {
            return 0.0;
        }
        (self.documents.len() as f64 / df as f64).ln()
    }

    fn analyze(&self, document: Document) -> IndexedDocument {
        let title_tokens: Vec<String> = tokenize(&document.title);
        let mut all_tokens: Vec<String> = tokenize(&document.body);
        all_tokens.extend(title_tokens.iter().cloned());

        let ngrams = if self.config.index.enable_ngrams {
            let mut seen = AHashSet::new();
            all_tokens
                .iter()
                .flat_map(|t| self.ngram_tokenizer.ngrams(t))
                .filter(|g| seen.insert(g.clone()))
                .collect()
        } else {
            Vec::new()
        };

        let tokens = if self.config.index.remove_stop_words {
            all_tokens.into_iter().filter(|t| !is_stop_word(t)).collect()
        } else {
            all_tokens
        };

        IndexedDocument {
            document,
            tokens,
            title_tokens,
            ngrams,
        }
    }

    fn insert(&mut self, indexed: IndexedDocument) {
        let slot = match self.slots.get(&indexed.document.id).copied() {
            Some(slot) => {
                self.remove_postings(slot);
                slot
            }
            None => {
                let slot = self.documents.len();
                self.slots.insert(indexed.document.id.clone(), slot);
                slot
            }
        };

        for token in &indexed.tokens {
            *self.frequencies.entry(token.clone()).or_insert(0) += 1;
            // Empty posting lists are always removed, so a missing key means
            // a new vocabulary term.
            if !self.inverted.contains_key(token) {
                self.register_term(token);
            }
            self.inverted.entry(token.clone()).or_default().insert(slot);
        }
        for ngram in &indexed.ngrams {
            self.ngram_index.entry(ngram.clone()).or_default().insert(slot);
        }

        if slot == self.documents.len() {
            self.documents.push(indexed);
        } else {
            self.documents[slot] = indexed;
        }
    }

    fn remove_postings(&mut self, slot: usize) {
        let old_tokens = std::mem::take(&mut self.documents[slot].tokens);
        let old_ngrams = std::mem::take(&mut self.documents[slot].ngrams);

        let mut seen = AHashSet::new();
        for token in old_tokens {
            if !seen.insert(token.clone()) {
                continue;
            }
            let emptied = match self.inverted.get_mut(&token) {
                Some(postings) => {
                    postings.remove(&slot);
                    postings.is_empty()
                }
                None => false,
            };
            if emptied {
                self.inverted.remove(&token);
                self.unregister_term(&token);
            }
        }
        for ngram in old_ngrams {
            if let Some(postings) = self.ngram_index.get_mut(&ngram) {
                postings.remove(&slot);
                if postings.is_empty() {
                    self.ngram_index.remove(&ngram);
                }
            }
        }
    }

    /// Record a new vocabulary term in the fuzzy and phonetic side tables.
    fn register_term(&mut self, term: &str) {
        for ngram in self.ngram_tokenizer.ngrams(term) {
            self.term_ngrams
                .entry(ngram)
                .or_default()
                .insert(term.to_string());
        }
        self.phonetic_index
            .entry(phonetic_key_normalized(term))
            .or_default()
            .insert(term.to_string());
    }

    fn unregister_term(&mut self, term: &str) {
        for ngram in self.ngram_tokenizer.ngrams(term) {
            if let Some(terms) = self.term_ngrams.get_mut(&ngram) {
                terms.remove(term);
                if terms.is_empty() {
                    self.term_ngrams.remove(&ngram);
                }
            }
        }
        let key = phonetic_key_normalized(term);
        if let Some(terms) = self.phonetic_index.get_mut(&key) {
            terms.remove(term);
            if terms.is_empty() {
                self.phonetic_index.remove(&key);
            }
        }
    }
}

/// Normalized, stop-word-filtered tokens of `text` as the index sees them.
pub fn index_terms(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !is_stop_word(t))
        .collect()
}
