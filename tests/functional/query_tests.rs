//! Functional tests for item filtering, search, and pagination

use serde_json::json;

use recondiff::diff::CompareField;
use recondiff::engine::{reconcile, MatchStatus, ReconcileConfig};
use recondiff::query::{query_items, ItemQuery, StatusFilter};

use crate::common::record;

/// Build a run with 12 items: 4 matches, 4 mismatches, 4 missing_in_b
fn build_items() -> Vec<recondiff::engine::ReconItem> {
    let config = ReconcileConfig {
        key_fields: vec!["id".to_string()],
        compare_fields: vec![CompareField::inferred("amount")],
        amount_tolerance: 0.0,
    };

    let mut a = Vec::new();
    let mut b = Vec::new();
    for i in 0..4 {
        let id = format!("EQ-{}", i);
        a.push(record(&[("id", json!(id)), ("amount", json!("10"))]));
        b.push(record(&[("id", json!(id)), ("amount", json!("10"))]));
    }
    for i in 0..4 {
        let id = format!("NE-{}", i);
        a.push(record(&[("id", json!(id)), ("amount", json!("10"))]));
        b.push(record(&[("id", json!(id)), ("amount", json!("20"))]));
    }
    for i in 0..4 {
        let id = format!("ONLY-A-{}", i);
        a.push(record(&[("id", json!(id)), ("amount", json!("10"))]));
    }

    reconcile(&a, &b, &config).unwrap().items
}

#[test]
fn test_status_filter_all() {
    let items = build_items();
    let query = ItemQuery::default();

    let page = query_items(&items, &query, 1, 25).unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.items.len(), 12);
}

#[test]
fn test_status_filter_only_mismatches() {
    let items = build_items();
    let query = ItemQuery {
        status: StatusFilter::Only(MatchStatus::Mismatch),
        search: None,
    };

    let page = query_items(&items, &query, 1, 25).unwrap();
    assert_eq!(page.total, 4);
    assert!(page.items.iter().all(|i| i.status == MatchStatus::Mismatch));
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let items = build_items();
    let query = ItemQuery {
        status: StatusFilter::All,
        search: Some("ONLY-a".to_string()),
    };

    let page = query_items(&items, &query, 1, 25).unwrap();
    assert_eq!(page.total, 4);
    assert!(page.items.iter().all(|i| i.key.starts_with("only-a")));
}

#[test]
fn test_search_metacharacters_are_literal() {
    let items = build_items();
    let query = ItemQuery {
        status: StatusFilter::All,
        search: Some("eq.1".to_string()),
    };

    // "." must not act as a wildcard that would match "eq-1"
    let page = query_items(&items, &query, 1, 25).unwrap();
    assert_eq!(page.total, 0);
}

#[test]
fn test_search_combines_with_status_filter() {
    let items = build_items();
    let query = ItemQuery {
        status: StatusFilter::Only(MatchStatus::Match),
        search: Some("-2".to_string()),
    };

    let page = query_items(&items, &query, 1, 25).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].key, "eq-2");
}

#[test]
fn test_pagination_windows() {
    let items = build_items();
    let query = ItemQuery::default();

    let first = query_items(&items, &query, 1, 5).unwrap();
    assert_eq!(first.total, 12);
    assert_eq!(first.items.len(), 5);

    let second = query_items(&items, &query, 2, 5).unwrap();
    assert_eq!(second.total, 12);
    assert_eq!(second.items.len(), 5);
    assert_ne!(first.items[0].key, second.items[0].key);

    let third = query_items(&items, &query, 3, 5).unwrap();
    assert_eq!(third.items.len(), 2);
}

#[test]
fn test_page_size_clamping() {
    let items = build_items();
    let query = ItemQuery::default();

    let tiny = query_items(&items, &query, 1, 1).unwrap();
    assert_eq!(tiny.page_size, 5);
    assert_eq!(tiny.items.len(), 5);

    let huge = query_items(&items, &query, 1, 10_000).unwrap();
    assert_eq!(huge.page_size, 100);
    assert_eq!(huge.items.len(), 12);
}

#[test]
fn test_out_of_range_page_keeps_total() {
    let items = build_items();
    let query = ItemQuery::default();

    let page = query_items(&items, &query, 99, 25).unwrap();
    assert_eq!(page.total, 12);
    assert!(page.items.is_empty());
}

#[test]
fn test_items_preserve_engine_order_within_page() {
    let items = build_items();
    let query = ItemQuery::default();

    let page = query_items(&items, &query, 1, 25).unwrap();
    let keys: Vec<&str> = page.items.iter().map(|i| i.key.as_str()).collect();
    let expected: Vec<&str> = items.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, expected);
}
