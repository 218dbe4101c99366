//! Shared helpers.

pub mod lenient;
pub mod levenshtein;
