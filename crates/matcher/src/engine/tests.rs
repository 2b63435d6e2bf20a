use super::*;
use canonical::NormalizeConfig;
use serde_json::json;

fn matcher_for(terms: serde_json::Value) -> Matcher {
    let vocab = Vocabulary::from_json_value(&terms, &NormalizeConfig::default())
        .expect("vocabulary loads");
    Matcher::new(vocab)
}

fn labels(result: &MatchResult) -> Vec<&str> {
    result
        .labels()
        .map(|set| set.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

#[test]
fn simple_term_matches_whole_tokens_only() {
    let matcher = matcher_for(json!(["cat"]));
    assert_eq!(matcher.match_text("new category launch"), MatchResult::NoMatch);
    assert_eq!(labels(&matcher.match_text("my Cat, again")), vec!["cat"]);
}

#[test]
fn simple_term_is_case_and_diacritic_insensitive() {
    let matcher = matcher_for(json!(["café"]));
    assert!(matcher.match_text("Best CAFE in town").is_matched());
    assert!(matcher.match_text("best cafe\u{0301}").is_matched());
}

#[test]
fn stroke_and_ligature_letters_match_their_ascii_spelling() {
    let matcher = matcher_for(json!(["lodz", "orsted", "strasse"]));
    assert_eq!(labels(&matcher.match_text("visit Łódź today")), vec!["lodz"]);
    assert_eq!(labels(&matcher.match_text("Ørsted news")), vec!["orsted"]);
    assert_eq!(labels(&matcher.match_text("Hauptstraße 5")), Vec::<&str>::new());
    assert_eq!(labels(&matcher.match_text("die Straße")), vec!["strasse"]);
}

#[test]
fn native_spelling_in_vocabulary_matches_ascii_rows() {
    let matcher = matcher_for(json!(["Łódź"]));
    assert!(matcher.match_text("flights to Lodz").is_matched());
}

#[test]
fn term_with_inner_whitespace_never_matches() {
    let matcher = matcher_for(json!(["new year", "alert"]));
    assert_eq!(matcher.match_text("happy new year"), MatchResult::NoMatch);
    assert_eq!(labels(&matcher.match_text("new year alert")), vec!["alert"]);
}

#[test]
fn phrase_in_declared_order_matches() {
    let matcher = matcher_for(json!([["new", "year"]]));
    assert_eq!(labels(&matcher.match_text("Happy new year")), vec!["new, year"]);
}

#[test]
fn phrase_does_not_require_adjacency() {
    let matcher = matcher_for(json!([["new", "year"]]));
    assert!(matcher.match_text("new and shiny year").is_matched());
}

#[test]
fn phrase_out_of_order_does_not_match() {
    let matcher = matcher_for(json!([["new", "year"]]));
    assert_eq!(matcher.match_text("year new"), MatchResult::NoMatch);
}

#[test]
fn incomplete_phrase_does_not_match() {
    let matcher = matcher_for(json!([["new", "year"]]));
    assert_eq!(matcher.match_text("something new"), MatchResult::NoMatch);
}

#[test]
fn phrase_order_uses_leftmost_occurrences() {
    let matcher = matcher_for(json!([["new", "year"]]));
    // leftmost "year" (0) precedes leftmost "new" (1)
    assert_eq!(matcher.match_text("year new year"), MatchResult::NoMatch);
    assert!(matcher.match_text("new year new").is_matched());
}

#[test]
fn only_first_two_phrase_tokens_are_order_checked() {
    let matcher = matcher_for(json!([["happy", "new", "year"]]));
    assert!(matcher.match_text("year happy new").is_matched());
    assert_eq!(matcher.match_text("new happy year"), MatchResult::NoMatch);
}

#[test]
fn duplicate_vocabulary_entries_report_once() {
    let matcher = matcher_for(json!(["sale", "sale", "SALE"]));
    let result = matcher.match_text("big sale today");
    assert_eq!(labels(&result), vec!["sale"]);
}

#[test]
fn all_matching_terms_are_collected_sorted() {
    let matcher = matcher_for(json!(["alert", ["breaking", "news"], "today", "absent"]));
    let result = matcher.match_text("Breaking news alert today");
    assert_eq!(labels(&result), vec!["alert", "breaking, news", "today"]);
}

#[test]
fn hashtags_and_mentions_are_tokens() {
    let matcher = matcher_for(json!(["#eleicoes", "@tse"]));
    let result = matcher.match_text("Veja: #Eleições2024 e #Eleições, via @TSE!");
    assert_eq!(labels(&result), vec!["#eleicoes", "@tse"]);
}

#[test]
fn empty_text_is_skipped() {
    let matcher = matcher_for(json!(["anything"]));
    assert_eq!(matcher.match_text(""), MatchResult::Empty);
    assert_eq!(matcher.match_text("  ?! "), MatchResult::Empty);
}

#[test]
fn post_only_excludes_non_posts_without_evaluating() {
    let matcher = matcher_for(json!(["alert"]));
    let scope = MatchScope::new("Tweet Text").post_only("Type");

    let post = Row::from_pairs(0, [("Tweet Text", "alert!"), ("Type", "Post")]);
    let comment = Row::from_pairs(1, [("Tweet Text", "alert!"), ("Type", "Comment")]);
    let silent_comment = Row::from_pairs(2, [("Tweet Text", ""), ("Type", "Comment")]);

    assert!(matcher.match_row(&post, &scope).is_matched());
    assert_eq!(matcher.match_row(&comment, &scope), MatchResult::Excluded);
    assert_eq!(matcher.match_row(&silent_comment, &scope), MatchResult::Excluded);
}

#[test]
fn without_post_only_comments_match_on_their_own() {
    let matcher = matcher_for(json!(["alert"]));
    let scope = MatchScope::new("Tweet Text");
    let comment = Row::from_pairs(1, [("Tweet Text", "alert!"), ("Type", "Comment")]);
    assert!(matcher.match_row(&comment, &scope).is_matched());
}

#[test]
fn missing_target_cell_is_empty() {
    let matcher = matcher_for(json!(["alert"]));
    let row = Row::from_pairs(0, [("Other", "alert")]);
    assert_eq!(
        matcher.match_row(&row, &MatchScope::new("Tweet Text")),
        MatchResult::Empty
    );
}

#[test]
fn match_result_serializes_with_labels() {
    let matcher = matcher_for(json!(["alert"]));
    let value = serde_json::to_value(matcher.match_text("alert")).expect("serializes");
    assert_eq!(value, json!({"type": "matched", "labels": ["alert"]}));
    let value = serde_json::to_value(MatchResult::NoMatch).expect("serializes");
    assert_eq!(value, json!({"type": "no_match"}));
}
