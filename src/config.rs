//! Engine configuration.
//!
//! Every section has sensible defaults, so a configuration file only needs to
//! name the values it changes.
//!
//! # Examples
//!
//! ```
//! use mafteah::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.index.ngram_size, 3);
//! assert_eq!(config.scoring.fuzzy_threshold, 0.8);
//! assert!(config.validate().is_ok());
//!
//! let custom: EngineConfig =
//!     serde_json::from_str(r#"{"scoring": {"title_boost": 3.0}}"#).unwrap();
//! assert_eq!(custom.scoring.title_boost, 3.0);
//! assert_eq!(custom.scoring.exact_match_boost, 1.5);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MafteahError, Result};
use crate::morphology::PseudoRootPolicy;
use crate::search::highlight::HighlightConfig;

/// Top-level configuration shared by the index, the streaming scanner and the worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub index: IndexConfig,
    pub scoring: ScoringConfig,
    pub expansion: ExpansionConfig,
    pub highlight: HighlightConfig,
    /// Fallback used by root extraction for words outside the root table.
    pub pseudo_root: PseudoRootPolicy,
}

/// How documents are analyzed when indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Drop stop words from the inverted index and from queries.
    pub remove_stop_words: bool,
    /// Build the n-gram index used for partial matching.
    pub enable_ngrams: bool,
    /// Window size for n-grams.
    pub ngram_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            remove_stop_words: true,
            enable_ngrams: true,
            ngram_size: 3,
        }
    }
}

/// Ranking weights and matching stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Multiplier applied when the term occurs in the document title.
    pub title_boost: f64,
    /// Multiplier applied when the term is one of the query's own tokens.
    pub exact_match_boost: f64,
    pub enable_fuzzy: bool,
    /// Minimum normalized edit-distance similarity (0.0..=1.0).
    pub fuzzy_threshold: f64,
    pub enable_phonetic: bool,
    pub enable_partial: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            title_boost: 2.0,
            exact_match_boost: 1.5,
            enable_fuzzy: true,
            fuzzy_threshold: 0.8,
            enable_phonetic: true,
            enable_partial: true,
        }
    }
}

/// Which query expansions are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    pub roots: bool,
    pub synonyms: bool,
    pub acronyms: bool,
    /// OCR confusion variants. Off by default.
    pub ocr: bool,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            roots: true,
            synonyms: true,
            acronyms: true,
            ocr: false,
        }
    }
}

impl ExpansionConfig {
    /// No expansion at all: the query matches only its own tokens.
    pub fn none() -> Self {
        ExpansionConfig {
            roots: false,
            synonyms: false,
            acronyms: false,
            ocr: false,
        }
    }
}

impl EngineConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.index.ngram_size == 0 {
            return Err(MafteahError::invalid_config("ngram_size must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.scoring.fuzzy_threshold) {
            return Err(MafteahError::invalid_config(format!(
                "fuzzy_threshold must be within 0.0..=1.0, got {}",
                self.scoring.fuzzy_threshold
            )));
        }
        for (name, boost) in [
            ("title_boost", self.scoring.title_boost),
            ("exact_match_boost", self.scoring.exact_match_boost),
        ] {
            if !boost.is_finite() || boost < 0.0 {
                return Err(MafteahError::invalid_config(format!(
                    "{name} must be a non-negative number, got {boost}"
                )));
            }
        }
        if self.highlight.max_snippets == 0 {
            return Err(MafteahError::invalid_config("max_snippets must be at least 1"));
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MafteahError::invalid_config(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// Parse and validate a JSON configuration string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.expansion.roots);
        assert!(!config.expansion.ocr);
        assert_eq!(config.pseudo_root, PseudoRootPolicy::FirstChars(3));
    }

    #[test]
    fn test_partial_json() {
        let config =
            EngineConfig::from_json_str(r#"{"index": {"ngram_size": 4}, "expansion": {"ocr": true}}"#)
                .unwrap();
        assert_eq!(config.index.ngram_size, 4);
        assert!(config.index.remove_stop_words);
        assert!(config.expansion.ocr);
        assert!(config.expansion.synonyms);
    }

    #[test]
    fn test_pseudo_root_policy_json() {
        let config =
            EngineConfig::from_json_str(r#"{"pseudo_root": {"kind": "disabled"}}"#).unwrap();
        assert_eq!(config.pseudo_root, PseudoRootPolicy::Disabled);

        let config = EngineConfig::from_json_str(
            r#"{"pseudo_root": {"kind": "first_chars", "length": 2}}"#,
        )
        .unwrap();
        assert_eq!(config.pseudo_root, PseudoRootPolicy::FirstChars(2));
    }

    #[test]
    fn test_invalid_values() {
        assert!(EngineConfig::from_json_str(r#"{"index": {"ngram_size": 0}}"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{"scoring": {"fuzzy_threshold": 1.5}}"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{"scoring": {"title_boost": -1.0}}"#).is_err());
        assert!(EngineConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"scoring": {{"enable_phonetic": false}}}}"#).unwrap();

        let config = EngineConfig::from_json_file(file.path()).unwrap();
        assert!(!config.scoring.enable_phonetic);

        let missing = EngineConfig::from_json_file("/nonexistent/mafteah.json");
        assert!(matches!(missing, Err(MafteahError::Config(_))));
    }
}
