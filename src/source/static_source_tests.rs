//! Tests for the static data source

use super::*;
use serde_json::json;

fn fruits() -> Vec<Value> {
    vec![
        json!({"name": "Apple", "id": 1}),
        json!({"name": "Apricot", "id": 2}),
        json!({"name": "Banana", "id": 3}),
    ]
}

fn fetch(source: &mut StaticSource, text: &str) -> Vec<ResultItem> {
    let query = Query::new(text, source.signature().to_string());
    source.begin_fetch(&query, RequestToken(1));
    match source.poll() {
        Some(FetchOutcome::Success { items, .. }) => items,
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn test_prefix_mode_matches_case_insensitively() {
    let mut source = StaticSource::new(fruits(), "name").with_mode(MatchMode::Prefix);

    let items = fetch(&mut source, "ap");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].display_text(), "Apple");
    assert_eq!(items[0].rank(), 0);
    assert_eq!(items[1].display_text(), "Apricot");
    assert_eq!(items[1].rank(), 1);
}

#[test]
fn test_contains_mode_finds_inner_substring() {
    let mut source = StaticSource::new(fruits(), "name");

    let items = fetch(&mut source, "nan");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].display_text(), "Banana");
}

#[test]
fn test_empty_text_matches_every_record() {
    let mut source = StaticSource::new(fruits(), "name");
    assert_eq!(fetch(&mut source, "").len(), 3);
}

#[test]
fn test_no_match_yields_empty_success() {
    let mut source = StaticSource::new(fruits(), "name");
    assert!(fetch(&mut source, "zzz").is_empty());
}

#[test]
fn test_fuzzy_mode_orders_by_score() {
    let records = vec![
        json!({"name": "application"}),
        json!({"name": "apple"}),
        json!({"name": "grape"}),
    ];
    let mut source = StaticSource::new(records, "name").with_mode(MatchMode::Fuzzy);

    let items = fetch(&mut source, "aple");

    // "grape" lacks the subsequence and drops out; the tighter match wins
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].display_text(), "apple");
    assert_eq!(items[0].rank(), 0);
}

#[test]
fn test_custom_predicate_overrides_mode() {
    let mut source = StaticSource::new(fruits(), "name")
        .with_predicate(|_, record| record["id"].as_i64() == Some(3));

    let items = fetch(&mut source, "anything");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].display_text(), "Banana");
}

#[test]
fn test_value_field_extracts_machine_value() {
    let mut source = StaticSource::new(fruits(), "name").with_value_field("id");

    let items = fetch(&mut source, "apple");

    assert_eq!(items[0].value(), &json!(1));
}

#[test]
fn test_dotted_field_path_reaches_nested_records() {
    let records = vec![
        json!({"fruit": {"name": "Apple"}}),
        json!({"fruit": {"name": "Banana"}}),
    ];
    let mut source = StaticSource::new(records, "fruit.name");

    let items = fetch(&mut source, "ban");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].display_text(), "Banana");
}

#[test]
fn test_records_without_the_field_are_skipped() {
    let records = vec![
        json!({"name": "Apple"}),
        json!({"label": "no display field"}),
    ];
    let mut source = StaticSource::new(records, "name");

    assert_eq!(fetch(&mut source, "").len(), 1);
}

#[test]
fn test_outcome_carries_the_request_token() {
    let mut source = StaticSource::new(fruits(), "name");
    let query = Query::new("a", source.signature().to_string());
    source.begin_fetch(&query, RequestToken(42));

    let outcome = source.poll().unwrap();
    assert_eq!(outcome.token(), RequestToken(42));
}

#[test]
fn test_poll_drains_the_ready_outcome() {
    let mut source = StaticSource::new(fruits(), "name");
    let query = Query::new("a", source.signature().to_string());
    source.begin_fetch(&query, RequestToken(1));

    assert!(source.poll().is_some());
    assert!(source.poll().is_none());
}

#[test]
fn test_cancel_drops_the_pending_outcome() {
    let mut source = StaticSource::new(fruits(), "name");
    let query = Query::new("a", source.signature().to_string());
    source.begin_fetch(&query, RequestToken(1));
    source.cancel();

    assert!(source.poll().is_none());
}

#[test]
fn test_seed_requires_exact_display_match() {
    let mut source = StaticSource::new(fruits(), "name");

    let exact = source.seed("apple").unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].display_text(), "Apple");

    assert!(source.seed("app").unwrap().is_empty());
}

#[test]
fn test_signatures_differ_per_dataset() {
    let a = StaticSource::new(fruits(), "name");
    let b = StaticSource::new(vec![json!({"name": "Cherry"})], "name");

    assert!(a.signature().starts_with("static:"));
    assert_ne!(a.signature(), b.signature());
}
