//! CLI argument validation tests.
//!
//! These tests verify that the CLI properly validates arguments and provides
//! helpful error messages.

use predicates::prelude::*;

use super::helpers::yvault_cmd;

#[test]
fn test_help_output() {
    yvault_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("yvault"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("decay"));
}

#[test]
fn test_run_help_output() {
    yvault_cmd()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SCENARIO"))
        .stdout(predicate::str::contains("--events"));
}

#[test]
fn test_decay_help_output() {
    yvault_cmd()
        .args(["decay", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--locked"))
        .stdout(predicate::str::contains("--duration"))
        .stdout(predicate::str::contains("--points"));
}

#[test]
fn test_invalid_command() {
    yvault_cmd()
        .arg("invalid_command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_run_missing_scenario() {
    yvault_cmd()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_decay_missing_locked() {
    yvault_cmd()
        .arg("decay")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_decay_invalid_amount() {
    yvault_cmd()
        .args(["decay", "--locked", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_invalid_output_format() {
    yvault_cmd()
        .args(["decay", "--locked", "1000", "--format", "invalid_format"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
