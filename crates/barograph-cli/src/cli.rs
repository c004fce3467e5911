//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "barograph")]
#[command(author, version, about = "Live dashboard client for streamed pressure readings", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Connect to a WebSocket endpoint and stream formatted readings
    Watch(WatchArgs),

    /// Classify JSON frames read from stdin, one per line
    Decode(DecodeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    /// WebSocket endpoint (overrides config), e.g. ws://localhost:8080/ws
    #[arg(short, long, env = "BAROGRAPH_URL")]
    pub url: Option<String>,

    /// Comma-separated device allow-list; empty means single-device mode
    #[arg(short, long, env = "BAROGRAPH_DEVICES")]
    pub devices: Option<String>,

    /// Calibration offset added to displayed pressure values
    #[arg(long)]
    pub offset: Option<f64>,

    /// Rolling buffer capacity shared by every series and the axis
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the final buffered state as JSON when the stream ends
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Require a deviceId on pressure frames (multi-device mode)
    #[arg(long)]
    pub multi: bool,
}
