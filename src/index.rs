//! Document storage and the inverted index.

pub mod document;
pub mod inverted;

pub use document::Document;
pub use inverted::{IndexStats, SearchIndex, index_terms};
