//! Command-line interface for strictly_solo.

use clap::Parser;
use std::path::PathBuf;
use strictly_solo::Mark;

/// Strictly Solo - tic-tac-toe against a scripted opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_solo")]
#[command(about = "Play tic-tac-toe against a random opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file (TOML). Flags below override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Play as this mark and skip the selection screen (x or o)
    #[arg(short, long)]
    pub mark: Option<Mark>,

    /// Opponent thinking delay in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// How long the matchmaking screen waits, in milliseconds
    #[arg(long, default_value = "3000")]
    pub matchmaking_ms: u64,

    /// Seed for the opponent's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
