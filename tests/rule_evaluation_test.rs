//! Integration tests for positional rules, filter sets and condition chains.

use mafteah::prelude::*;
use mafteah::rules::{Relation, TextPosition};

const SEGMENT: &str = "רבי יוחנן אמר";

#[test]
fn test_position_rule_from_json() {
    let rule: PositionRule = serde_json::from_str(
        r#"{"word": "רבי", "relativeWord": "אמר", "position": "before", "maxDistance": 10}"#,
    )
    .unwrap();
    assert!(check_position_rule(SEGMENT, &rule));
    assert!(!check_position_rule("אמר רבי יוחנן", &rule));

    let tight = rule.clone().max_distance(1);
    assert!(!check_position_rule(SEGMENT, &tight));

    let missing = PositionRule::new("רבי", "שמעון", Relation::Before);
    assert!(!check_position_rule(SEGMENT, &missing));

    let anywhere = PositionRule::new("רבי", "אמר", Relation::Anywhere);
    assert!(check_position_rule(SEGMENT, &anywhere));
    assert!(check_position_rule("אמר רבי יוחנן", &anywhere));
}

#[test]
fn test_text_position_rule() {
    let rule: TextPositionRule =
        serde_json::from_str(r#"{"word": "יוחנן", "position": "start", "withinWords": 2}"#).unwrap();
    assert!(check_text_position_rule(SEGMENT, &rule));
    assert!(!check_text_position_rule("אמר רבי שמעון בשם רבי יוחנן", &rule));

    let end = TextPositionRule::new("יוחנן", TextPosition::End).window_size(1);
    assert!(check_text_position_rule("אמר רבי שמעון בשם רבי יוחנן", &end));
}

#[test]
fn test_filter_set_is_conjunctive() {
    let passing = FilterRuleSet::new()
        .min_word_count(2)
        .max_word_count(5)
        .must_contain_digits(false)
        .letters_only(true)
        .position_rule(PositionRule::new("רבי", "אמר", Relation::Before))
        .text_position_rule(TextPositionRule::new("רבי", TextPosition::Start));
    assert!(check_filter_rules(SEGMENT, &passing));

    // Flipping any single rule to failing flips the whole set.
    let variants = [
        passing.clone().min_word_count(4),
        passing.clone().max_word_count(2),
        passing.clone().must_contain_digits(true),
        passing
            .clone()
            .position_rule(PositionRule::new("אמר", "רבי", Relation::Before)),
        passing
            .clone()
            .text_position_rule(TextPositionRule::new("אמר", TextPosition::Start).window_size(1)),
    ];
    for (i, rules) in variants.iter().enumerate() {
        assert!(!check_filter_rules(SEGMENT, rules), "variant {i} should fail");
    }

    assert!(!check_filter_rules("רבי יוחנן אמר: 3", &passing.clone().must_contain_digits(false)));
}

#[test]
fn test_condition_chain() {
    let options = MatchOptions::default();
    let both = vec![SearchCondition::and("רבי"), SearchCondition::and("אמר")];
    assert!(search_with_conditions(SEGMENT, &both, options));
    assert!(!search_with_conditions("רבי יוחנן", &both, options));

    let mut excluded = both.clone();
    excluded.push(SearchCondition::not("שמעון"));
    assert!(search_with_conditions(SEGMENT, &excluded, options));
    assert!(!search_with_conditions("רבי שמעון אמר", &excluded, options));

    assert!(search_with_conditions(SEGMENT, &[], options));
}

#[test]
fn test_or_uses_current_match() {
    let options = MatchOptions::default();
    let chain = vec![SearchCondition::and("שמעון"), SearchCondition::or("מאיר")];
    assert!(!search_with_conditions(SEGMENT, &chain, options));

    let chain = vec![SearchCondition::and("שמעון"), SearchCondition::or("יוחנן")];
    assert!(search_with_conditions(SEGMENT, &chain, options));
}

#[test]
fn test_chain_from_json() {
    let chain: Vec<SearchCondition> = serde_json::from_str(
        r#"[
            {"term": "רבי"},
            {"term": "יוחנן", "combinator": "NEAR", "near": {"word": "אמר", "distance": 1, "direction": "after"}},
            {"combinator": "LIST", "list": {"words": ["אמר", "שאל"], "mode": "any"}}
        ]"#,
    )
    .unwrap();
    assert!(search_with_conditions(SEGMENT, &chain, MatchOptions::default()));
    assert!(!search_with_conditions("רבי אמר יוחנן", &chain, MatchOptions::default()));
}
