//! The rotation loop: one tick at a time, one watch session at a time.
//!
//! Each tick finishes an exhausted watch, polls discovery for the live set,
//! asks the selector for a candidate, and switches the single active session
//! if the candidate differs from the current one. Checkpointing only follows
//! a successful `stop()`, so a failed tick never corrupts the ledger.

use crate::ledger::Ledger;
use crate::selector;
use anyhow::Result;
use dw_actuator::WatchActuator;
use dw_core::format_remaining;
use dw_discovery::Discovery;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Whether a watch session is currently active, and for which ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    /// Index into the ledger's entry list.
    Watching(usize),
}

/// The scheduler: owns the ledger, the current-watch state, and the external
/// collaborators. Constructed once at startup and driven by [`Rotator::run`].
pub struct Rotator {
    ledger: Ledger,
    ledger_path: PathBuf,
    discovery: Box<dyn Discovery + Send + Sync>,
    actuator: Box<dyn WatchActuator>,
    state: WatchState,
    interval: Duration,
}

impl Rotator {
    pub fn new(
        ledger: Ledger,
        ledger_path: PathBuf,
        discovery: Box<dyn Discovery + Send + Sync>,
        actuator: Box<dyn WatchActuator>,
        interval: Duration,
    ) -> Self {
        Self {
            ledger,
            ledger_path,
            discovery,
            actuator,
            state: WatchState::Idle,
            interval,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[cfg(test)]
    pub(crate) fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: WatchState) {
        self.state = state;
    }

    /// Run ticks until `shutdown` flips to true, then write a final
    /// checkpoint if a session is active.
    ///
    /// Tick failures are logged and swallowed; the loop itself only ends on
    /// cancellation.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        loop {
            if *shutdown.borrow() {
                break;
            }

            if let Err(error) = self.tick().await {
                warn!("Tick failed: {error:#}");
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                changed = shutdown.changed() => {
                    // A closed channel means the signal task is gone; treat
                    // it the same as a shutdown request.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Cancellation observed, shutting down");
        self.finish()
    }

    /// One pass of the state machine. Steps run in a fixed order; any error
    /// ends the tick early and leaves the next tick to start fresh.
    pub async fn tick(&mut self) -> Result<()> {
        // 1. Finish the current watch if its time is exhausted.
        if let WatchState::Watching(idx) = self.state {
            let left = self.ledger.entries[idx].current_remaining();
            info!(
                "Watching: {}, left - {}",
                self.ledger.entries[idx].channel,
                format_remaining(left)
            );
            if left.is_zero() {
                info!(channel = %self.ledger.entries[idx].channel, "Watch time exhausted");
                self.ledger.entries[idx].stop();
                self.ledger.checkpoint(&self.ledger_path)?;
                self.state = WatchState::Idle;
            }
        } else {
            info!("Watching: NONE");
        }

        // 2-3. Refresh the live set and select a candidate.
        let live = self.discovery.live_channels().await?;
        let Some(candidate) = selector::select_next(&self.ledger.entries, &live) else {
            // 4. Nothing eligible: stay in the current state.
            debug!("No candidate channel this tick");
            return Ok(());
        };

        // 5. Already watching the candidate: nothing to do.
        if self.state == WatchState::Watching(candidate) {
            debug!(
                channel = %self.ledger.entries[candidate].channel,
                "Candidate is already being watched"
            );
            return Ok(());
        }

        // 6. Switch: end the old session (if any), start the new one.
        self.actuator.stop_current().await?;
        if let WatchState::Watching(idx) = self.state {
            self.ledger.entries[idx].stop();
            self.ledger.checkpoint(&self.ledger_path)?;
        }

        let entry = &mut self.ledger.entries[candidate];
        info!(channel = %entry.channel, "Starting watch session");
        self.actuator.start_watching(&entry.url).await?;
        entry.start()?;
        self.state = WatchState::Watching(candidate);
        Ok(())
    }

    /// Final checkpoint on loop exit.
    fn finish(&mut self) -> Result<()> {
        if let WatchState::Watching(idx) = self.state {
            self.ledger.entries[idx].stop();
            self.ledger.checkpoint(&self.ledger_path)?;
            self.state = WatchState::Idle;
            info!("Final checkpoint written");
        }
        Ok(())
    }
}
