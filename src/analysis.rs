//! Text analysis for Hebrew search.
//!
//! This module provides normalization (niqqud removal, final-letter folding,
//! case and whitespace folding), word tokenization, and character n-grams.

pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod tokenizer;

pub use normalizer::{normalize, normalize_sofit, remove_niqqud};
pub use tokenizer::hebrew::tokenize;
