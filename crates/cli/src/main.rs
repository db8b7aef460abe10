//! yvault CLI - Run multi-strategy vault scenarios.

mod cli;
mod commands;
mod output;
mod scenario;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use commands::{run_decay, run_scenario};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            run_scenario(&args, cli.format)?;
        }
        Commands::Decay(args) => {
            run_decay(&args, cli.format)?;
        }
    }

    Ok(())
}
