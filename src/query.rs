//! Query analysis and expansion.

pub mod expander;

pub use expander::{ExpandedQuery, QueryExpander, expand_query};
