use anyhow::Result;
use clap::Parser;

mod cli;
mod run_cmd;

use cli::{Cli, Commands};
use dw_config::DEFAULT_TICK_SECS;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            interval,
            no_browser,
        }) => run_cmd::handle_run(&cli.config, interval, no_browser).await,
        // Bare invocation mirrors `run` with the default cadence and no
        // browser side effects.
        None => run_cmd::handle_run(&cli.config, Some(DEFAULT_TICK_SECS), true).await,
    }
}
