//! Ranking, highlighting and suggestions.

pub mod highlight;
pub mod result;
pub mod scorer;
pub mod suggest;

pub use highlight::{HighlightConfig, Highlighter};
pub use result::{MatchType, SearchResult};
