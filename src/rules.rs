//! Declarative constraints evaluated against one text segment at a time.
//!
//! Rules are plain data, usually deserialized from JSON authored elsewhere.
//! Evaluation never fails: a rule missing a required field simply does not
//! hold, so one bad rule cannot abort a whole filter set.

pub mod condition;
pub mod filter;
pub mod position;

pub use condition::{
    Combinator, ListMode, ListParams, MatchOptions, NearDirection, NearParams, SearchCondition,
    matches_condition, search_with_conditions,
};
pub use filter::{FilterRuleSet, check_filter_rules};
pub use position::{
    PositionRule, Relation, TextPosition, TextPositionRule, check_position_rule,
    check_text_position_rule,
};

/// Index of the first token containing `word`.
pub(crate) fn first_token_containing(tokens: &[String], word: &str) -> Option<usize> {
    if word.is_empty() {
        return None;
    }
    tokens.iter().position(|t| t.contains(word))
}
