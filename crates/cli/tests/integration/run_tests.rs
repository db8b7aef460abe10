//! Scenario execution tests.

use predicates::prelude::*;
use serde_json::Value;

use super::helpers::run_fixture;

#[test]
fn test_gain_scenario_table() {
    run_fixture("gain_scenario", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("add_strategy"))
        .stdout(predicate::str::contains("gain 100, loss 0"))
        .stdout(predicate::str::contains("500 shares -> 550 delivered, 0 short"))
        .stdout(predicate::str::contains("Total Supply: 500"))
        .stdout(predicate::str::contains("Total Assets: 550"))
        .stdout(predicate::str::contains("Share Price:  1.1"))
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn test_gain_scenario_json() {
    let output = run_fixture("gain_scenario", &["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    let steps = report["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 8);
    assert_eq!(steps[0]["action"], "deposit");
    assert_eq!(steps[5]["action"], "report");
    assert_eq!(steps[5]["timestamp"], 1_700_000_060);
    assert!(steps.iter().all(|s| s["failed"] == false));
    assert!(!report["events"].as_array().unwrap().is_empty());
}

#[test]
fn test_events_flag() {
    run_fixture("gain_scenario", &["--events"])
        .assert()
        .success()
        .stdout(predicate::str::contains("StrategyAdded"))
        .stdout(predicate::str::contains("Report"));
}

#[test]
fn test_expected_errors_are_recorded() {
    run_fixture("expected_errors", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("deposit (failed)"))
        .stdout(predicate::str::contains("Vault is paused"))
        .stdout(predicate::str::contains("report_all (failed)"))
        .stdout(predicate::str::contains("set_locked_profit_duration (failed)"))
        .stdout(predicate::str::contains("Paused:       No"));
}

#[test]
fn test_harvest_scenario() {
    run_fixture("harvest_scenario", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("lent 135"))
        .stdout(predicate::str::contains("suspended, 500 collected"))
        .stdout(predicate::str::contains("removed, 0 received"))
        .stdout(predicate::str::contains("gain 0, loss 10"))
        .stdout(predicate::str::contains("Total Assets: 1260"))
        .stdout(predicate::str::contains("Strategies:   1"));
}

#[test]
fn test_unexpected_failure_aborts() {
    run_fixture("failing_step", &[])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step 2 (redeem) failed"));
}

#[test]
fn test_unexpected_success_aborts() {
    run_fixture("unexpected_success", &[])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Step 1 (deposit) succeeded but was expected to fail",
        ));
}

#[test]
fn test_malformed_scenario() {
    run_fixture("malformed", &[])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse scenario"));
}

#[test]
fn test_missing_scenario_file() {
    run_fixture("does_not_exist", &[])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read scenario"));
}
