//! Tokenizer implementations for text analysis.
//!
//! - [`hebrew::HebrewTokenizer`] - Normalizes and splits on whitespace and
//!   punctuation, keeping abbreviation quote marks inside words
//! - [`ngram::NgramTokenizer`] - Fixed-size character windows for partial matching
//!
//! # Examples
//!
//! ```
//! use mafteah::analysis::tokenizer::Tokenizer;
//! use mafteah::analysis::tokenizer::hebrew::HebrewTokenizer;
//!
//! let tokenizer = HebrewTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("רבי יוחנן, אמר").map(|t| t.text).collect();
//! assert_eq!(tokens, vec!["רבי", "יוחננ", "אמר"]);
//! ```

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert text into tokens.
///
/// Tokenization never fails: input that yields no words produces an empty
/// stream.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod hebrew;
pub mod ngram;
