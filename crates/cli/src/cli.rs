//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// yvault CLI - Run multi-strategy vault scenarios
#[derive(Parser, Debug)]
#[command(name = "yvault")]
#[command(about = "CLI tool for running multi-strategy vault scenarios", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a JSON scenario against a fresh vault
    #[command(name = "run")]
    Run(RunArgs),
    /// Print how a locked profit unlocks over time
    #[command(name = "decay")]
    Decay(DecayArgs),
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the scenario file
    pub scenario: PathBuf,

    /// Also print the event log (table format only)
    #[arg(long)]
    pub events: bool,
}

#[derive(Parser, Debug)]
pub struct DecayArgs {
    /// Profit locked at the start, in asset units
    #[arg(long)]
    pub locked: u128,

    /// Unlock window in seconds
    #[arg(long, default_value = "21600")]
    pub duration: u64,

    /// Number of intervals to sample
    #[arg(long, default_value = "6")]
    pub points: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
