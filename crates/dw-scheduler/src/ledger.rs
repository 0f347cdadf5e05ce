//! Ledger persistence: the authoritative progress file and the one-shot
//! discovery snapshot.
//!
//! The ledger file is rewritten in full on every checkpoint. It carries no
//! timestamps, so loading and re-checkpointing an unchanged ledger reproduces
//! the file byte for byte.

use crate::entry::WatchEntry;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use dw_core::WatchError;
use dw_discovery::DiscoveredChannel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Grace buffer added on top of the advertised hours-only figure when writing
/// the discovery snapshot.
const SNAPSHOT_GRACE_SECS: u64 = 5 * 60;

/// Ordered collection of watch entries, keyed by channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(rename = "watch_list", default)]
    pub entries: Vec<WatchEntry>,
}

impl Ledger {
    /// Load the ledger from `path`.
    ///
    /// A missing file yields a ledger with a single placeholder entry,
    /// persisted immediately. A present-but-malformed file is a fatal startup
    /// error; there is no partial-recovery policy.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No ledger file, creating one");
            let ledger = Self {
                entries: vec![WatchEntry::default()],
            };
            ledger.checkpoint(path)?;
            return Ok(ledger);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ledger file: {}", path.display()))?;
        let ledger: Self =
            serde_json::from_str(&contents).map_err(|e| WatchError::MalformedLedger {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        debug!(entries = ledger.entries.len(), "Ledger loaded");
        Ok(ledger)
    }

    /// Serialize the full ledger and overwrite the file at `path`.
    pub fn checkpoint(&self, path: &Path) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize ledger")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write ledger file: {}", path.display()))?;
        debug!(path = %path.display(), "Ledger checkpointed");
        Ok(())
    }
}

/// Diagnostic snapshot of a full discovery scan. Written once at startup,
/// never read back.
#[derive(Debug, Serialize)]
struct DiscoverySnapshot {
    generated_at: DateTime<Utc>,
    watch_list: Vec<WatchEntry>,
}

/// Write the full-discovery snapshot file: every discovered channel with its
/// advertised duration plus the grace buffer.
pub fn write_discovery_snapshot(path: &Path, channels: &[DiscoveredChannel]) -> Result<()> {
    let snapshot = DiscoverySnapshot {
        generated_at: Utc::now(),
        watch_list: channels
            .iter()
            .map(|c| {
                WatchEntry::new(
                    c.channel.clone(),
                    c.url.clone(),
                    c.advertised_seconds + SNAPSHOT_GRACE_SECS,
                )
            })
            .collect(),
    };

    let contents =
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize discovery snapshot")?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write discovery snapshot: {}", path.display()))?;
    info!(path = %path.display(), channels = channels.len(), "Discovery snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_creates_placeholder_and_persists() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("ledger.json");

        let ledger = Ledger::load(&path).unwrap();
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.entries[0].channel, "");
        assert_eq!(ledger.entries[0].remaining_seconds, 0);
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("ledger.json");

        let ledger = Ledger {
            entries: vec![
                WatchEntry::new("b_channel", "https://twitch.tv/b", 50),
                WatchEntry::new("a_channel", "https://twitch.tv/a", 10),
            ],
        };
        ledger.checkpoint(&path).unwrap();

        let loaded = Ledger::load(&path).unwrap();
        assert_eq!(loaded.entries.len(), 2);
        assert_eq!(loaded.entries[0].channel, "b_channel");
        assert_eq!(loaded.entries[0].url, "https://twitch.tv/b");
        assert_eq!(loaded.entries[0].remaining_seconds, 50);
        assert_eq!(loaded.entries[1].channel, "a_channel");
    }

    #[test]
    fn test_checkpoint_of_loaded_ledger_is_byte_identical() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("ledger.json");

        let ledger = Ledger {
            entries: vec![WatchEntry::new("a", "https://twitch.tv/a", 42)],
        };
        ledger.checkpoint(&path).unwrap();
        let first = fs::read(&path).unwrap();

        let loaded = Ledger::load(&path).unwrap();
        loaded.checkpoint(&path).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("ledger.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Ledger::load(&path).unwrap_err();
        assert!(err.to_string().contains("Malformed ledger file"));
    }

    #[test]
    fn test_snapshot_adds_grace_buffer() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("discovery.json");

        let channels = vec![DiscoveredChannel {
            channel: "a".into(),
            url: "https://twitch.tv/a".into(),
            advertised_seconds: 2 * 3600,
        }];
        write_discovery_snapshot(&path, &channels).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value["watch_list"][0]["remaining_seconds"],
            serde_json::json!(2 * 3600 + 300)
        );
        assert!(value["generated_at"].is_string());
    }
}
