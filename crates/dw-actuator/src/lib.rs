//! Watch actuation: starting and stopping the external viewing process.
//!
//! The rotation loop only ever talks to the [`WatchActuator`] trait. The real
//! implementation opens stream URLs in a browser and ends sessions by killing
//! the browser process; [`NullActuator`] keeps all scheduling bookkeeping
//! working with no side effects at all.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// External-facing boundary for the single active watch session.
#[async_trait]
pub trait WatchActuator: Send + Sync {
    /// End the current viewing session. Idempotent; a no-op when nothing is
    /// being viewed.
    async fn stop_current(&self) -> Result<()>;

    /// Begin viewing `url`.
    async fn start_watching(&self, url: &str) -> Result<()>;
}

/// Actuator that drives a real browser.
pub struct BrowserActuator {
    /// Command that opens a URL (e.g. `xdg-open`).
    open_command: String,
    /// Process name handed to `pkill` to end a session.
    process_name: String,
}

impl BrowserActuator {
    pub fn new(open_command: impl Into<String>, process_name: impl Into<String>) -> Self {
        Self {
            open_command: open_command.into(),
            process_name: process_name.into(),
        }
    }
}

#[async_trait]
impl WatchActuator for BrowserActuator {
    async fn stop_current(&self) -> Result<()> {
        let status = Command::new("pkill")
            .arg(&self.process_name)
            .status()
            .await
            .context("Failed to run pkill")?;

        // pkill exits 1 when no process matched, which is the idle case.
        match status.code() {
            Some(0) => info!(process = %self.process_name, "Browser session stopped"),
            Some(1) => debug!(process = %self.process_name, "No browser session to stop"),
            code => warn!(process = %self.process_name, ?code, "pkill exited abnormally"),
        }
        Ok(())
    }

    async fn start_watching(&self, url: &str) -> Result<()> {
        let mut cmd = Command::new(&self.open_command);
        cmd.arg(url);
        cmd.stdout(std::process::Stdio::null());
        cmd.stderr(std::process::Stdio::null());

        // Detach the opener into its own process group so it is not tied to
        // our signal handling or lifetime.
        // SAFETY: setsid() is async-signal-safe and runs before exec, so no
        // Rust runtime state exists in the child yet.
        #[cfg(unix)]
        unsafe {
            cmd.pre_exec(|| {
                libc::setsid();
                Ok(())
            });
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to launch '{}'", self.open_command))?;
        info!(url, "Browser session started");

        // Reap the opener in the background; it exits as soon as the URL is
        // handed to the browser.
        tokio::spawn(async move {
            let _ = child.wait().await;
        });
        Ok(())
    }
}

/// Actuator with every side effect disabled (`--no-browser`).
pub struct NullActuator;

#[async_trait]
impl WatchActuator for NullActuator {
    async fn stop_current(&self) -> Result<()> {
        debug!("Browser actions disabled, skipping stop");
        Ok(())
    }

    async fn start_watching(&self, url: &str) -> Result<()> {
        debug!(url, "Browser actions disabled, skipping start");
        Ok(())
    }
}
