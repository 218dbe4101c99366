//! Query expansion over the lexical tables.
//!
//! Each query token is kept and then widened with the forms of its root
//! cluster, its synonyms, the full forms of an abbreviation and OCR variants,
//! depending on [`ExpansionConfig`]. Terms are normalized and deduplicated in
//! first-seen order, so the query's own tokens always come first.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::hebrew::tokenize;
use crate::config::ExpansionConfig;
use crate::lexicon::acronyms::{acronym_expansions, looks_like_acronym};
use crate::lexicon::ocr::ocr_variants;
use crate::lexicon::stop_words::is_stop_word;
use crate::lexicon::synonyms::synonyms_for;
use crate::morphology::{PseudoRootPolicy, RootExtractor, word_forms_for_root};

/// A query after tokenization and expansion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpandedQuery {
    /// The query's own normalized tokens, after stop-word removal.
    pub original: Vec<String>,
    /// `original` followed by every expansion term, unique.
    pub terms: Vec<String>,
}

impl ExpandedQuery {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether `term` came from the query text rather than from expansion.
    pub fn is_original(&self, term: &str) -> bool {
        self.original.iter().any(|t| t == term)
    }
}

/// Expands queries according to an [`ExpansionConfig`].
#[derive(Clone, Debug)]
pub struct QueryExpander {
    config: ExpansionConfig,
    roots: RootExtractor,
    remove_stop_words: bool,
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::new(ExpansionConfig::default())
    }
}

impl QueryExpander {
    pub fn new(config: ExpansionConfig) -> Self {
        QueryExpander {
            config,
            roots: RootExtractor::new(),
            remove_stop_words: true,
        }
    }

    pub fn with_pseudo_root_policy(mut self, policy: PseudoRootPolicy) -> Self {
        self.roots = RootExtractor::with_policy(policy);
        self
    }

    pub fn with_stop_word_removal(mut self, remove: bool) -> Self {
        self.remove_stop_words = remove;
        self
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Tokenize and expand `query`.
    ///
    /// Stop words are dropped unless the query consists of nothing else.
    pub fn expand(&self, query: &str) -> ExpandedQuery {
        let mut tokens = tokenize(query);
        if self.remove_stop_words {
            let content: Vec<String> = tokens
                .iter()
                .filter(|t| !is_stop_word(t))
                .cloned()
                .collect();
            if !content.is_empty() {
                tokens = content;
            }
        }

        let mut terms = TermSet::default();
        for token in &tokens {
            terms.push(token.clone());
        }
        let original = terms.terms.clone();

        for token in &tokens {
            if self.config.roots {
                if let Some(key) = self.roots.extract_root(token) {
                    for form in word_forms_for_root(&key) {
                        terms.push(form);
                    }
                }
            }

            if self.config.synonyms {
                for synonym in synonyms_for(token) {
                    terms.push(synonym);
                }
            }

            if self.config.acronyms && looks_like_acronym(token) {
                for expansion in acronym_expansions(token) {
                    let words: Vec<String> = expansion
                        .split(' ')
                        .filter(|w| !w.is_empty())
                        .filter(|w| !(self.remove_stop_words && is_stop_word(w)))
                        .map(str::to_string)
                        .collect();
                    terms.push(expansion);
                    for word in words {
                        terms.push(word);
                    }
                }
            }

            if self.config.ocr {
                for variant in ocr_variants(token) {
                    terms.push(variant);
                }
            }
        }

        log::trace!("expanded {:?} into {} terms", query, terms.len());

        ExpandedQuery {
            original,
            terms: terms.terms,
        }
    }
}

#[derive(Default)]
struct TermSet {
    terms: Vec<String>,
    seen: AHashSet<String>,
}

impl TermSet {
    fn push(&mut self, term: String) {
        if !term.is_empty() && self.seen.insert(term.clone()) {
            self.terms.push(term);
        }
    }

    fn len(&self) -> usize {
        self.terms.len()
    }
}

/// Expand `query` with the default configuration.
///
/// ```
/// use mafteah::query::expand_query;
///
/// let expanded = expand_query("משפט");
/// assert_eq!(expanded.terms[0], "משפט");
/// assert!(expanded.terms.contains(&"שופט".to_string()));
/// assert!(expanded.terms.contains(&"חוק".to_string()));
/// ```
pub fn expand_query(query: &str) -> ExpandedQuery {
    QueryExpander::default().expand(query)
}
