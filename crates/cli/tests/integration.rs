//! Integration tests for the yvault CLI.
//!
//! These tests run the compiled binary against scenario fixtures.
//!
//! # Test Categories
//!
//! - **Run tests**: scenario execution, expected failures, output formats
//! - **Decay tests**: locked profit release curve
//! - **CLI validation tests**: Argument parsing, help text, error handling
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p yvault-rs-cli --test integration
//! ```

mod integration {
    pub mod helpers;
    pub mod run_tests;
    pub mod decay_tests;
    pub mod cli_validation_tests;
}
