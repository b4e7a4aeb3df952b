//! End-to-end workflow tests driving the CLI layer

use crate::common::{sample_data, CliTestRunner};

#[test]
fn test_import_reconcile_summary_workflow() {
    let runner = CliTestRunner::new().unwrap();

    let path_a = runner
        .fixture()
        .create_csv("ledger.csv", &sample_data::ledger_csv_a())
        .unwrap();
    let path_b = runner
        .fixture()
        .create_csv("bank.csv", &sample_data::ledger_csv_b())
        .unwrap();

    runner.expect_success(&["import", path_a.to_str().unwrap(), "--name", "ledger"]);
    runner.expect_success(&["import", path_b.to_str().unwrap(), "--name", "bank"]);

    runner.expect_success(&[
        "reconcile", "ledger", "bank", "--key", "invoice", "--compare", "amount",
    ]);

    // Latest-run fallback serves summary and items without an explicit id
    runner.expect_success(&["summary"]);
    runner.expect_success(&["items", "--status", "mismatch"]);
    runner.expect_success(&["items", "--search", "inv", "--page", "1", "--page-size", "10"]);
    runner.expect_success(&["list", "--format", "json"]);

    let runs = runner.fixture().store.list_runs().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].summary.matches, 1);
    assert_eq!(runs[0].summary.mismatches, 1);
    assert_eq!(runs[0].summary.missing_in_b, 1);
    assert_eq!(runs[0].summary.missing_in_a, 1);
}

#[test]
fn test_reconcile_unknown_dataset_fails() {
    let runner = CliTestRunner::new().unwrap();
    let err = runner.expect_failure(&["reconcile", "ghost", "bank", "--key", "id"]);
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn test_summary_without_runs_fails() {
    let runner = CliTestRunner::new().unwrap();
    let err = runner.expect_failure(&["summary"]);
    assert!(err.to_string().contains("No reconciliation runs"));
}

#[test]
fn test_import_missing_file_fails() {
    let runner = CliTestRunner::new().unwrap();
    let err = runner.expect_failure(&["import", "does-not-exist.csv"]);
    assert!(err.to_string().contains("File not found"));
}

#[test]
fn test_reconcile_bad_compare_spec_fails() {
    let runner = CliTestRunner::new().unwrap();

    let path = runner
        .fixture()
        .create_csv("ledger.csv", &sample_data::ledger_csv_a())
        .unwrap();
    runner.expect_success(&["import", path.to_str().unwrap(), "--name", "ledger"]);

    let err = runner.expect_failure(&[
        "reconcile", "ledger", "ledger", "--key", "invoice", "--compare", "amount:fuzzy",
    ]);
    assert!(err.to_string().contains("Invalid compare strategy"));
}
