//! Segment-level filters combining counts, character classes and position
//! rules.

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::analysis::tokenizer::hebrew::tokenize;
use crate::rules::position::{
    PositionRule, TextPositionRule, check_position_rule, check_text_position_rule,
};

/// A conjunction of constraints. Unset fields do not constrain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterRuleSet {
    pub min_word_count: Option<usize>,
    pub max_word_count: Option<usize>,
    /// `Some(true)` requires a digit, `Some(false)` forbids one.
    pub must_contain_digits: Option<bool>,
    /// Only letters, combining marks and whitespace allowed.
    pub letters_only: bool,
    pub position_rules: Vec<PositionRule>,
    pub text_position_rules: Vec<TextPositionRule>,
}

impl FilterRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_word_count(mut self, count: usize) -> Self {
        self.min_word_count = Some(count);
        self
    }

    pub fn max_word_count(mut self, count: usize) -> Self {
        self.max_word_count = Some(count);
        self
    }

    pub fn must_contain_digits(mut self, required: bool) -> Self {
        self.must_contain_digits = Some(required);
        self
    }

    pub fn letters_only(mut self, letters_only: bool) -> Self {
        self.letters_only = letters_only;
        self
    }

    pub fn position_rule(mut self, rule: PositionRule) -> Self {
        self.position_rules.push(rule);
        self
    }

    pub fn text_position_rule(mut self, rule: TextPositionRule) -> Self {
        self.text_position_rules.push(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Whether `segment` passes every rule in `rules`. Stops at the first
/// failing rule.
pub fn check_filter_rules(segment: &str, rules: &FilterRuleSet) -> bool {
    if rules.min_word_count.is_some() || rules.max_word_count.is_some() {
        let count = tokenize(segment).len();
        if rules.min_word_count.is_some_and(|min| count < min) {
            return false;
        }
        if rules.max_word_count.is_some_and(|max| count > max) {
            return false;
        }
    }

    if let Some(required) = rules.must_contain_digits {
        let has_digit = segment.chars().any(|c| c.is_ascii_digit());
        if has_digit != required {
            return false;
        }
    }

    if rules.letters_only
        && !normalize(segment)
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace())
    {
        return false;
    }

    rules
        .position_rules
        .iter()
        .all(|rule| check_position_rule(segment, rule))
        && rules
            .text_position_rules
            .iter()
            .all(|rule| check_text_position_rule(segment, rule))
}
