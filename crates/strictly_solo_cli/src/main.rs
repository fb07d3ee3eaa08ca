//! Strictly Solo - terminal front end
//!
//! Pick a mark, wait for the opponent, play, and see the running score.

#![warn(missing_docs)]

mod cli;
mod controller;
mod render;
mod screen;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use controller::Controller;
use std::time::Duration;
use strictly_solo::EngineConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli)?;

    let config = load_config(&cli)?;
    info!(?config, "Starting Strictly Solo");

    let mut controller = Controller::new(
        config,
        Duration::from_millis(cli.matchmaking_ms),
        cli.mark,
    );
    controller.run().await
}

/// Logs go to stderr at `warn` unless `RUST_LOG` says otherwise, so they
/// stay out of the board's way. `--log-file` sends them to a file.
fn init_tracing(cli: &Cli) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match &cli.log_file {
        Some(path) => {
            let log_file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Config file first, then flags on top.
fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(delay_ms) = cli.delay_ms {
        config = config.with_opponent_delay(Duration::from_millis(delay_ms));
    }
    if cli.seed.is_some() {
        config = config.with_seed(cli.seed);
    }
    Ok(config)
}
