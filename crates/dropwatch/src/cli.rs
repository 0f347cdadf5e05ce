use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dropwatch")]
#[command(about = "Rotates a single browser watch session across live drop channels")]
pub struct Cli {
    // Bare invocation falls back to `run` with defaults and no browser
    // actions (handled in main).
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the configuration file
    #[arg(long, default_value = "dropwatch.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the rotation loop
    Run {
        /// Tick interval in seconds (defaults to the configured value)
        interval: Option<u64>,

        /// Skip all browser actions; bookkeeping still runs
        #[arg(long)]
        no_browser: bool,
    },
}
