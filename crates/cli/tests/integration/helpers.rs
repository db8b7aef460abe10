//! Test helper utilities for CLI integration tests.

#![allow(deprecated)] // Command::cargo_bin deprecation

use assert_cmd::Command;

/// Create a CLI command.
pub fn yvault_cmd() -> Command {
    Command::cargo_bin("yvault").unwrap()
}

/// Absolute path of a scenario fixture.
pub fn fixture_path(name: &str) -> String {
    format!(
        "{}/tests/fixtures/{}.json",
        env!("CARGO_MANIFEST_DIR"),
        name
    )
}

/// Run a fixture with the given extra arguments placed before the path.
pub fn run_fixture(name: &str, extra: &[&str]) -> Command {
    let mut cmd = yvault_cmd();
    cmd.arg("run").args(extra).arg(fixture_path(name));
    cmd
}
