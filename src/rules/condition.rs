//! Boolean condition chains over a text segment.
//!
//! A chain is evaluated left to right: the first condition seeds the result
//! and every later condition folds its own match in through its combinator.
//! There is no operator precedence.

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::analysis::tokenizer::hebrew::HebrewTokenizer;
use crate::util::lenient::{lenient_string, lenient_string_list};

pub const DEFAULT_NEAR_DISTANCE: usize = 10;

fn default_near_distance() -> usize {
    DEFAULT_NEAR_DISTANCE
}

fn default_true() -> bool {
    true
}

/// How a condition joins the result accumulated so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    #[default]
    And,
    Or,
    Not,
    Near,
    List,
    /// Any other name. Folds as `And`.
    #[serde(other)]
    Unrecognized,
}

/// Which side of the term the `NEAR` word must be on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NearDirection {
    Before,
    After,
    #[default]
    #[serde(alias = "any", alias = "anywhere")]
    Either,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearParams {
    #[serde(default, deserialize_with = "lenient_string")]
    pub word: String,
    #[serde(default = "default_near_distance")]
    pub distance: usize,
    #[serde(default)]
    pub direction: NearDirection,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    #[default]
    Any,
    All,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub words: Vec<String>,
    #[serde(default)]
    pub mode: ListMode,
}

/// One link of a condition chain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCondition {
    #[serde(default, deserialize_with = "lenient_string")]
    pub term: String,
    #[serde(default, alias = "operator")]
    pub combinator: Combinator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near: Option<NearParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListParams>,
}

impl SearchCondition {
    pub fn new<S: Into<String>>(term: S, combinator: Combinator) -> Self {
        SearchCondition {
            term: term.into(),
            combinator,
            near: None,
            list: None,
        }
    }

    pub fn and<S: Into<String>>(term: S) -> Self {
        Self::new(term, Combinator::And)
    }

    pub fn or<S: Into<String>>(term: S) -> Self {
        Self::new(term, Combinator::Or)
    }

    pub fn not<S: Into<String>>(term: S) -> Self {
        Self::new(term, Combinator::Not)
    }

    /// `term` with `word` at most `distance` tokens away.
    pub fn near<S, W>(term: S, word: W, distance: usize, direction: NearDirection) -> Self
    where
        S: Into<String>,
        W: Into<String>,
    {
        SearchCondition {
            near: Some(NearParams {
                word: word.into(),
                distance,
                direction,
            }),
            ..Self::new(term, Combinator::Near)
        }
    }

    pub fn list<I, W>(words: I, mode: ListMode) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        SearchCondition {
            list: Some(ListParams {
                words: words.into_iter().map(Into::into).collect(),
                mode,
            }),
            ..Self::new("", Combinator::List)
        }
    }
}

/// How terms are compared against the segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    /// Normalize segment and terms before comparing.
    #[serde(default = "default_true")]
    pub normalize: bool,
    /// Match whole words instead of substrings.
    #[serde(default)]
    pub whole_word: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            normalize: true,
            whole_word: false,
        }
    }
}

impl MatchOptions {
    pub fn whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }

    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    fn prepare(&self, text: &str) -> String {
        if self.normalize {
            normalize(text)
        } else {
            text.to_string()
        }
    }

    fn words(&self, text: &str) -> Vec<String> {
        let tokenizer = if self.normalize {
            HebrewTokenizer::new()
        } else {
            HebrewTokenizer::raw()
        };
        tokenizer.words(text)
    }

    fn token_matches(&self, token: &str, word: &str) -> bool {
        if self.whole_word {
            token == word
        } else {
            token.contains(word)
        }
    }
}

/// Pre-split view of one segment.
struct Segment {
    text: String,
    words: Vec<String>,
    options: MatchOptions,
}

impl Segment {
    fn new(segment: &str, options: MatchOptions) -> Self {
        Segment {
            text: options.prepare(segment),
            words: options.words(segment),
            options,
        }
    }

    fn contains(&self, term: &str) -> bool {
        if !self.options.whole_word {
            let term = self.options.prepare(term);
            return !term.is_empty() && self.text.contains(term.as_str());
        }

        let needle = self.options.words(term);
        !needle.is_empty() && self.words.windows(needle.len()).any(|w| w == needle.as_slice())
    }

    fn position_of(&self, word: &str) -> Option<usize> {
        let word = self.options.prepare(word);
        if word.is_empty() {
            return None;
        }
        self.words
            .iter()
            .position(|t| self.options.token_matches(t, &word))
    }

    fn near(&self, term: &str, params: &NearParams) -> bool {
        let (Some(anchor), Some(other)) = (self.position_of(term), self.position_of(&params.word))
        else {
            return false;
        };
        if anchor.abs_diff(other) > params.distance {
            return false;
        }
        match params.direction {
            NearDirection::Before => other < anchor,
            NearDirection::After => other > anchor,
            NearDirection::Either => true,
        }
    }

    fn list(&self, params: &ListParams) -> bool {
        if params.words.is_empty() {
            return false;
        }
        match params.mode {
            ListMode::Any => params.words.iter().any(|w| self.contains(w)),
            ListMode::All => params.words.iter().all(|w| self.contains(w)),
        }
    }

    fn matches(&self, condition: &SearchCondition) -> bool {
        match condition.combinator {
            Combinator::Near => condition
                .near
                .as_ref()
                .is_some_and(|params| self.near(&condition.term, params)),
            Combinator::List => condition
                .list
                .as_ref()
                .is_some_and(|params| self.list(params)),
            _ => condition.term.trim().is_empty() || self.contains(&condition.term),
        }
    }
}

/// The condition's own match against `segment`, ignoring its combinator's
/// place in a chain.
///
/// An empty term always matches. `NEAR` and `LIST` conditions without their
/// parameters never match.
pub fn matches_condition(segment: &str, condition: &SearchCondition, options: MatchOptions) -> bool {
    Segment::new(segment, options).matches(condition)
}

/// Evaluate a condition chain against `segment`.
///
/// The first condition's combinator is ignored. `NEAR`, `LIST` and
/// unrecognized combinators fold as `AND`. An empty chain matches.
///
/// ```
/// use mafteah::rules::{MatchOptions, SearchCondition, search_with_conditions};
///
/// let chain = vec![SearchCondition::and("שבת"), SearchCondition::or("חג")];
/// assert!(search_with_conditions("הלכות חג", &chain, MatchOptions::default()));
/// ```
pub fn search_with_conditions(
    segment: &str,
    conditions: &[SearchCondition],
    options: MatchOptions,
) -> bool {
    let Some((first, rest)) = conditions.split_first() else {
        return true;
    };

    let segment = Segment::new(segment, options);
    rest.iter()
        .fold(segment.matches(first), |result, condition| {
            let matched = segment.matches(condition);
            match condition.combinator {
                Combinator::Or => result || matched,
                Combinator::Not => result && !matched,
                Combinator::And
                | Combinator::Near
                | Combinator::List
                | Combinator::Unrecognized => result && matched,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(segment: &str, chain: &[SearchCondition]) -> bool {
        search_with_conditions(segment, chain, MatchOptions::default())
    }

    #[test]
    fn test_empty_chain_and_term() {
        assert!(eval("כלום", &[]));
        assert!(eval("כלום", &[SearchCondition::and("")]));
        assert!(matches_condition("", &SearchCondition::and("  "), MatchOptions::default()));
    }

    #[test]
    fn test_and_or_not() {
        let segment = "הלכות שבת וחג";
        assert!(eval(segment, &[SearchCondition::and("שבת"), SearchCondition::and("חג")]));
        assert!(!eval(segment, &[SearchCondition::and("שבת"), SearchCondition::and("פסח")]));

        assert!(eval(segment, &[SearchCondition::and("פסח"), SearchCondition::or("שבת")]));
        assert!(!eval(segment, &[SearchCondition::and("פסח"), SearchCondition::or("סוכות")]));

        assert!(!eval(segment, &[SearchCondition::and("שבת"), SearchCondition::not("חג")]));
        assert!(eval(segment, &[SearchCondition::and("שבת"), SearchCondition::not("פסח")]));
    }

    #[test]
    fn test_left_to_right_without_precedence() {
        // (false || true) && !false
        let chain = [
            SearchCondition::and("פסח"),
            SearchCondition::or("שבת"),
            SearchCondition::not("סוכות"),
        ];
        assert!(eval("שבת שלום", &chain));
        // (true && false) || true
        let chain = [
            SearchCondition::and("שבת"),
            SearchCondition::and("פסח"),
            SearchCondition::or("שלום"),
        ];
        assert!(eval("שבת שלום", &chain));
    }

    #[test]
    fn test_first_combinator_ignored() {
        assert!(eval("שבת", &[SearchCondition::not("שבת")]));
        assert!(!eval("שבת", &[SearchCondition::not("חג")]));
    }

    #[test]
    fn test_unrecognized_folds_as_and() {
        let chain: Vec<SearchCondition> = serde_json::from_str(
            r#"[{"term": "שבת"}, {"term": "פסח", "combinator": "XOR"}]"#,
        )
        .unwrap();
        assert_eq!(chain[0].combinator, Combinator::And);
        assert_eq!(chain[1].combinator, Combinator::Unrecognized);
        assert!(!eval("שבת", &chain));
        assert!(eval("שבת ופסח", &chain));
    }

    #[test]
    fn test_near() {
        let segment = "רבי יוחנן אמר משום רבי שמעון";
        let near = SearchCondition::near("יוחנן", "אמר", 1, NearDirection::Either);
        assert!(matches_condition(segment, &near, MatchOptions::default()));

        let far = SearchCondition::near("יוחנן", "שמעון", 2, NearDirection::Either);
        assert!(!matches_condition(segment, &far, MatchOptions::default()));

        let before = SearchCondition::near("אמר", "יוחנן", 5, NearDirection::Before);
        assert!(matches_condition(segment, &before, MatchOptions::default()));
        let after = SearchCondition::near("אמר", "יוחנן", 5, NearDirection::After);
        assert!(!matches_condition(segment, &after, MatchOptions::default()));

        let missing = SearchCondition::new("אמר", Combinator::Near);
        assert!(!matches_condition(segment, &missing, MatchOptions::default()));

        assert!(eval(segment, &[SearchCondition::and("רבי"), near]));
        assert!(!eval(segment, &[SearchCondition::and("רבי"), far]));
    }

    #[test]
    fn test_list() {
        let segment = "דיני נזיקין וחוזים";
        let any = SearchCondition::list(["קניין", "נזיקין"], ListMode::Any);
        assert!(matches_condition(segment, &any, MatchOptions::default()));
        let all = SearchCondition::list(["קניין", "נזיקין"], ListMode::All);
        assert!(!matches_condition(segment, &all, MatchOptions::default()));
        let all = SearchCondition::list(["חוזים", "נזיקין"], ListMode::All);
        assert!(matches_condition(segment, &all, MatchOptions::default()));
        let empty = SearchCondition::list(Vec::<String>::new(), ListMode::Any);
        assert!(!matches_condition(segment, &empty, MatchOptions::default()));
    }

    #[test]
    fn test_match_options() {
        let segment = "וְהַשַּׁבָּת קדושה";
        let condition = SearchCondition::and("שבת");
        assert!(matches_condition(segment, &condition, MatchOptions::default()));
        assert!(!matches_condition(segment, &condition, MatchOptions::default().normalize(false)));

        let whole = MatchOptions::default().whole_word(true);
        assert!(!matches_condition(segment, &condition, whole));
        assert!(matches_condition(segment, &SearchCondition::and("והשבת"), whole));
        assert!(matches_condition("שבת שלום לכולם", &SearchCondition::and("שבת שלום"), whole));
        assert!(!matches_condition("שבתות שלום", &SearchCondition::and("שבת שלום"), whole));
    }

    #[test]
    fn test_condition_json() {
        let chain: Vec<SearchCondition> = serde_json::from_str(
            r#"[
                {"term": "יוחנן", "combinator": "NEAR", "near": {"word": "אמר", "distance": 2}},
                {"combinator": "LIST", "list": {"words": ["שמעון", "לוי"], "mode": "any"}},
                {"term": "מאיר", "operator": "NOT"}
            ]"#,
        )
        .unwrap();
        assert_eq!(chain[0].near.as_ref().unwrap().direction, NearDirection::Either);
        assert_eq!(chain[2].combinator, Combinator::Not);
        assert!(eval("רבי יוחנן אמר משום רבי שמעון", &chain));
        assert!(!eval("רבי יוחנן אמר משום רבי מאיר", &chain));
    }

    #[test]
    fn test_null_fields_deserialize() {
        let chain: Vec<SearchCondition> = serde_json::from_str(
            r#"[
                {"term": "יוחנן"},
                {"term": null, "combinator": "NEAR", "near": {"word": null}},
                {"combinator": "LIST", "list": {"words": null}}
            ]"#,
        )
        .unwrap();
        assert_eq!(chain[1].near.as_ref().unwrap().word, "");
        assert!(chain[2].list.as_ref().unwrap().words.is_empty());
        assert!(!matches_condition("רבי יוחנן אמר", &chain[1], MatchOptions::default()));
        assert!(!matches_condition("רבי יוחנן אמר", &chain[2], MatchOptions::default()));
        assert!(eval("רבי יוחנן אמר", &chain[..1]));
        assert!(!eval("רבי יוחנן אמר", &chain));
    }
}
