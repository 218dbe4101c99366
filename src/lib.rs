//! # Mafteah
//!
//! Hebrew-aware full-text search for short text segments such as case
//! documents and verses.
//!
//! ## Features
//!
//! - Niqqud stripping and final-letter folding
//! - Root clustering with prefix and suffix stripping
//! - Synonym, acronym and OCR-variant query expansion
//! - Exact, fuzzy, phonetic and n-gram partial matching with TF-IDF ranking
//! - Batched streaming scans over un-indexed corpora
//! - A search worker driven by JSON messages
//! - Positional and boolean rule evaluation over segments
//!
//! ```
//! use mafteah::index::{Document, SearchIndex};
//!
//! let mut index = SearchIndex::with_defaults();
//! index.build_index(vec![
//!     Document::new("1", "דיני חוזים", "החוזה נחתם בין הצדדים"),
//!     Document::new("2", "", "מזג האוויר נאה"),
//! ]);
//! let results = index.search("חוזה", 10);
//! assert_eq!(results[0].doc_id, "1");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod lexicon;
pub mod morphology;
pub mod query;
pub mod rules;
pub mod search;
pub mod streaming;
pub mod util;
pub mod worker;

pub mod prelude {
    pub use crate::analysis::{normalize, normalize_sofit, remove_niqqud, tokenize};
    pub use crate::config::EngineConfig;
    pub use crate::error::{MafteahError, Result};
    pub use crate::index::{Document, IndexStats, SearchIndex};
    pub use crate::lexicon::{calculate_gematria, convert_number_to_hebrew};
    pub use crate::morphology::{RootExtractor, extract_root};
    pub use crate::query::{ExpandedQuery, QueryExpander};
    pub use crate::rules::{
        FilterRuleSet, MatchOptions, PositionRule, SearchCondition, TextPositionRule,
        check_filter_rules, check_position_rule, check_text_position_rule,
        search_with_conditions,
    };
    pub use crate::search::{MatchType, SearchResult};
    pub use crate::streaming::StreamingSearch;
    pub use crate::worker::SearchWorker;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
