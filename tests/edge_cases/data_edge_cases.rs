//! Edge case tests for dataset loading and normalization boundaries

use serde_json::json;

use recondiff::data::load_dataset;
use recondiff::diff::CompareField;
use recondiff::engine::{reconcile, ReconcileConfig};

use crate::common::{record, TestFixture};

fn id_amount_config() -> ReconcileConfig {
    ReconcileConfig {
        key_fields: vec!["id".to_string()],
        compare_fields: vec![CompareField::inferred("amount")],
        amount_tolerance: 0.0,
    }
}

#[test]
fn test_csv_short_rows_padded_with_empty_strings() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_csv_raw("short.csv", "id,name,amount\n1,Apple\n2,Banana,0.75\n")
        .unwrap();

    let dataset = load_dataset(&path, "short").unwrap();
    assert_eq!(dataset.rows.len(), 2);
    assert_eq!(dataset.rows[0].get("amount"), Some(&json!("")));
    assert_eq!(dataset.rows[1].get("amount"), Some(&json!("0.75")));
}

#[test]
fn test_csv_headers_only_yields_empty_dataset() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_csv_raw("empty.csv", "id,amount\n").unwrap();

    let dataset = load_dataset(&path, "empty").unwrap();
    assert_eq!(dataset.headers, vec!["id", "amount"]);
    assert!(dataset.rows.is_empty());
}

#[test]
fn test_csv_unicode_values_survive_loading() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_csv(
            "unicode.csv",
            &[
                vec!["id", "name", "amount"],
                vec!["1", "Café", "₹1500"],
                vec!["2", "北京", "¥200"],
            ],
        )
        .unwrap();

    let dataset = load_dataset(&path, "unicode").unwrap();
    assert_eq!(dataset.rows[0].get("name"), Some(&json!("Café")));
    assert_eq!(dataset.rows[1].get("name"), Some(&json!("北京")));
}

#[test]
fn test_rupee_amounts_reconcile_against_plain_numbers() {
    let a = vec![record(&[("id", json!("1")), ("amount", json!("₹1,500"))])];
    let b = vec![record(&[("id", json!("1")), ("amount", json!("1500"))])];

    let outcome = reconcile(&a, &b, &id_amount_config()).unwrap();
    assert_eq!(outcome.summary.matches, 1);
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_csv_raw("data.txt", "id,amount\n1,2\n").unwrap();

    let err = load_dataset(&path, "data").unwrap_err();
    assert!(err.to_string().contains("Unsupported file type"));
}

#[test]
fn test_missing_file_is_rejected() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.root().join("nope.csv");

    let err = load_dataset(&path, "nope").unwrap_err();
    assert!(err.to_string().contains("File not found"));
}

#[test]
fn test_whitespace_only_keys_are_unkeyable() {
    let a = vec![record(&[("id", json!("   ")), ("amount", json!("5"))])];
    let b = vec![record(&[("id", json!("   ")), ("amount", json!("5"))])];

    let outcome = reconcile(&a, &b, &id_amount_config()).unwrap();
    assert_eq!(outcome.summary.skipped_a, 1);
    assert_eq!(outcome.summary.skipped_b, 1);
    assert!(outcome.items.is_empty());
}

#[test]
fn test_keys_with_internal_whitespace_trim_edges_only() {
    let a = vec![record(&[("id", json!(" Big Corp ")), ("amount", json!("5"))])];
    let b = vec![record(&[("id", json!("big corp")), ("amount", json!("5"))])];

    let outcome = reconcile(&a, &b, &id_amount_config()).unwrap();
    assert_eq!(outcome.summary.matches, 1);
    assert_eq!(outcome.items[0].key, "big corp");
}

#[test]
fn test_numeric_json_values_as_keys() {
    let a = vec![record(&[("id", json!(42)), ("amount", json!(10))])];
    let b = vec![record(&[("id", json!("42")), ("amount", json!("10.0"))])];

    let outcome = reconcile(&a, &b, &id_amount_config()).unwrap();
    assert_eq!(outcome.summary.matches, 1);
}

#[test]
fn test_duplicate_a_records_each_probe_the_lookup() {
    let a = vec![
        record(&[("id", json!("1")), ("amount", json!("10"))]),
        record(&[("id", json!("1")), ("amount", json!("20"))]),
    ];
    let b = vec![record(&[("id", json!("1")), ("amount", json!("10"))])];

    let outcome = reconcile(&a, &b, &id_amount_config()).unwrap();
    assert_eq!(outcome.summary.matches, 1);
    assert_eq!(outcome.summary.mismatches, 1);
    assert_eq!(outcome.summary.missing_in_a, 0);
}

#[test]
fn test_huge_and_tiny_amounts() {
    let a = vec![record(&[("id", json!("1")), ("amount", json!("1e12"))])];
    let b = vec![record(&[("id", json!("1")), ("amount", json!("1000000000000"))])];

    let outcome = reconcile(&a, &b, &id_amount_config()).unwrap();
    assert_eq!(outcome.summary.matches, 1);
}
