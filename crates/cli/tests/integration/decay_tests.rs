//! Locked profit decay command tests.

use predicates::prelude::*;
use serde_json::Value;

use super::helpers::yvault_cmd;

#[test]
fn test_decay_table() {
    yvault_cmd()
        .args(["decay", "--locked", "1000", "--points", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Released %"))
        .stdout(predicate::str::contains("10800"))
        .stdout(predicate::str::contains("50.00%"))
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn test_decay_json() {
    let output = yvault_cmd()
        .args(["decay", "--locked", "600", "--duration", "60", "--points", "3", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let curve: Value = serde_json::from_slice(&output.stdout).unwrap();
    let points = curve.as_array().unwrap();
    assert_eq!(points.len(), 4);
    assert_eq!(points[0]["elapsed"], 0);
    assert_eq!(points[1]["elapsed"], 20);
    assert_eq!(points[3]["elapsed"], 60);
}

#[test]
fn test_decay_zero_duration() {
    yvault_cmd()
        .args(["decay", "--locked", "1000", "--duration", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid locked profit duration"));
}

#[test]
fn test_decay_zero_points() {
    yvault_cmd()
        .args(["decay", "--locked", "1000", "--points", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}
