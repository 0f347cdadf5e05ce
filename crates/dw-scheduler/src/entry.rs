//! A time-tracked record of one channel's remaining eligible-watch duration.

use dw_core::WatchError;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// One channel in the ledger.
///
/// `remaining_seconds` is the authoritative checkpointed figure; while the
/// entry is being watched, the live remaining time is derived from it and the
/// `running_since` instant. Only [`WatchEntry::stop`] writes the derived value
/// back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchEntry {
    /// Stable channel identifier, unique within the ledger.
    #[serde(default)]
    pub channel: String,
    /// Opaque locator handed to the watch actuator.
    #[serde(default)]
    pub url: String,
    /// Checkpointed remaining watch time.
    #[serde(default)]
    pub remaining_seconds: u64,
    /// Set only while this entry is the actively watched one. Not persisted.
    #[serde(skip)]
    running_since: Option<Instant>,
}

impl WatchEntry {
    pub fn new(channel: impl Into<String>, url: impl Into<String>, remaining_seconds: u64) -> Self {
        Self {
            channel: channel.into(),
            url: url.into(),
            remaining_seconds,
            running_since: None,
        }
    }

    /// Begin tracking elapsed watch time against this entry.
    pub fn start(&mut self) -> Result<(), WatchError> {
        if self.running_since.is_some() {
            return Err(WatchError::AlreadyRunning(self.channel.clone()));
        }
        self.running_since = Some(Instant::now());
        Ok(())
    }

    /// Test hook: begin tracking as if `start()` had been called at `at`.
    #[cfg(test)]
    pub(crate) fn start_at(&mut self, at: Instant) {
        self.running_since = Some(at);
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Remaining watch time right now, clamped at zero.
    ///
    /// A pure read: idle entries report `remaining_seconds` unchanged, running
    /// entries subtract the elapsed time since `start()`.
    pub fn current_remaining(&self) -> Duration {
        let base = Duration::from_secs(self.remaining_seconds);
        match self.running_since {
            None => base,
            Some(since) => base.saturating_sub(since.elapsed()),
        }
    }

    /// Fold the elapsed watch time back into `remaining_seconds`.
    ///
    /// No-op on an idle entry. The write-back floors to whole seconds, so
    /// sub-second precision exists only while running.
    pub fn stop(&mut self) {
        if self.running_since.is_none() {
            return;
        }
        self.remaining_seconds = self.current_remaining().as_secs();
        self.running_since = None;
    }
}
