//! Word order and placement rules.

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::analysis::tokenizer::hebrew::tokenize;
use crate::rules::first_token_containing;
use crate::util::lenient::lenient_string;

pub const DEFAULT_MAX_DISTANCE: usize = 10;
pub const DEFAULT_WINDOW_SIZE: usize = 3;

fn default_max_distance() -> usize {
    DEFAULT_MAX_DISTANCE
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

/// Order of the anchor word relative to the other word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Before,
    After,
    Anywhere,
    #[serde(other)]
    Unrecognized,
}

/// `word` must occur before/after `relative_word`, at most `max_distance`
/// tokens apart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRule {
    #[serde(default, deserialize_with = "lenient_string")]
    pub word: String,
    #[serde(default, alias = "relative_word", deserialize_with = "lenient_string")]
    pub relative_word: String,
    #[serde(default, rename = "position", alias = "relation")]
    pub relation: Option<Relation>,
    #[serde(default = "default_max_distance", alias = "max_distance")]
    pub max_distance: usize,
}

impl PositionRule {
    pub fn new<W, R>(word: W, relative_word: R, relation: Relation) -> Self
    where
        W: Into<String>,
        R: Into<String>,
    {
        PositionRule {
            word: word.into(),
            relative_word: relative_word.into(),
            relation: Some(relation),
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }

    pub fn max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }
}

/// Whether `segment` satisfies `rule`.
///
/// Both words are located by the first token containing them.
///
/// ```
/// use mafteah::rules::{PositionRule, Relation, check_position_rule};
///
/// let rule = PositionRule::new("רבי", "אמר", Relation::Before);
/// assert!(check_position_rule("רבי יוחנן אמר", &rule));
/// assert!(!check_position_rule("אמר רבי יוחנן", &rule));
/// ```
pub fn check_position_rule(segment: &str, rule: &PositionRule) -> bool {
    let relation = match rule.relation {
        Some(Relation::Unrecognized) | None => return false,
        Some(relation) => relation,
    };

    let tokens = tokenize(segment);
    let Some(anchor) = first_token_containing(&tokens, &normalize(&rule.word)) else {
        return false;
    };
    let Some(relative) = first_token_containing(&tokens, &normalize(&rule.relative_word)) else {
        return false;
    };

    if anchor.abs_diff(relative) > rule.max_distance {
        return false;
    }
    match relation {
        Relation::Before => anchor < relative,
        Relation::After => anchor > relative,
        Relation::Anywhere => true,
        Relation::Unrecognized => false,
    }
}

/// Where in the segment a word must appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Start,
    End,
    Anywhere,
    #[serde(other)]
    Unrecognized,
}

/// `word` must appear within the first or last `window_size` tokens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPositionRule {
    #[serde(default, deserialize_with = "lenient_string")]
    pub word: String,
    #[serde(default)]
    pub position: Option<TextPosition>,
    #[serde(
        default = "default_window_size",
        alias = "withinWords",
        alias = "window_size"
    )]
    pub window_size: usize,
}

impl TextPositionRule {
    pub fn new<W: Into<String>>(word: W, position: TextPosition) -> Self {
        TextPositionRule {
            word: word.into(),
            position: Some(position),
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }
}

/// Whether `segment` satisfies `rule`.
pub fn check_text_position_rule(segment: &str, rule: &TextPositionRule) -> bool {
    let word = normalize(&rule.word);
    if word.is_empty() {
        return false;
    }

    let tokens = tokenize(segment);
    let contains = |t: &String| t.contains(word.as_str());
    match rule.position {
        Some(TextPosition::Start) => tokens.iter().take(rule.window_size).any(contains),
        Some(TextPosition::End) => tokens.iter().rev().take(rule.window_size).any(contains),
        Some(TextPosition::Anywhere) => tokens.iter().any(contains),
        Some(TextPosition::Unrecognized) | None => false,
    }
}
