//! The `run` command: wire config, ledger, discovery, and actuator into the
//! rotation loop.

use anyhow::{Context, Result};
use dw_actuator::{BrowserActuator, NullActuator, WatchActuator};
use dw_config::WatchConfig;
use dw_core::WatchError;
use dw_discovery::{Discovery, DropsPage};
use dw_scheduler::{Ledger, Rotator, write_discovery_snapshot};
use std::path::Path;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

pub async fn handle_run(
    config_path: &Path,
    interval: Option<u64>,
    no_browser: bool,
) -> Result<()> {
    let config = WatchConfig::load(config_path)?;

    let interval_secs = interval.unwrap_or(config.tick_interval_secs);
    if interval_secs == 0 {
        return Err(WatchError::InvalidInterval.into());
    }
    info!(interval_secs, no_browser, "Starting dropwatch");

    // Malformed ledger aborts here, before any loop state exists.
    let ledger = Ledger::load(&config.ledger_path)?;

    // One-time full scan: seeds the diagnostic snapshot, not the ledger.
    let discovery = DropsPage::new(&config.page_url);
    let all = discovery
        .all_channels()
        .await
        .context("Full discovery scan failed")?;
    for channel in &all {
        info!(
            channel = %channel.channel,
            seconds = channel.advertised_seconds,
            url = %channel.url,
            "Discovered channel"
        );
    }
    write_discovery_snapshot(&config.snapshot_path, &all)?;

    let actuator: Box<dyn WatchActuator> = if no_browser {
        Box::new(NullActuator)
    } else {
        Box::new(BrowserActuator::new(
            &config.browser.open_command,
            &config.browser.process_name,
        ))
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    let mut rotator = Rotator::new(
        ledger,
        config.ledger_path.clone(),
        Box::new(discovery),
        actuator,
        Duration::from_secs(interval_secs),
    );
    rotator.run(shutdown_rx).await
}
