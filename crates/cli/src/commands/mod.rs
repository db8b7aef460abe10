//! Command implementations.

pub mod decay;
pub mod run;

pub use decay::run_decay;
pub use run::run_scenario;
