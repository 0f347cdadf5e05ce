//! Runtime configuration loading (dropwatch.toml).
//!
//! Every field has a default, so running without a config file works out of
//! the box. A present-but-malformed file is a startup error; silently falling
//! back to defaults would mask typos.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default tick cadence when neither the CLI nor the config file set one.
pub const DEFAULT_TICK_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Schedule page listing drop channels and advertised durations.
    #[serde(default = "default_page_url")]
    pub page_url: String,

    /// Authoritative per-channel progress file, rewritten on checkpoint.
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,

    /// Diagnostic full-discovery snapshot, written once at startup.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Tick interval in seconds; overridden by the CLI argument.
    #[serde(default = "default_tick_secs")]
    pub tick_interval_secs: u64,

    #[serde(default)]
    pub browser: BrowserConfig,
}

/// How the watch actuator opens and kills the viewing browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Command that opens a URL in the browser.
    #[serde(default = "default_open_command")]
    pub open_command: String,

    /// Process name passed to `pkill` when a session must end.
    #[serde(default = "default_process_name")]
    pub process_name: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            page_url: default_page_url(),
            ledger_path: default_ledger_path(),
            snapshot_path: default_snapshot_path(),
            tick_interval_secs: default_tick_secs(),
            browser: BrowserConfig::default(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            open_command: default_open_command(),
            process_name: default_process_name(),
        }
    }
}

fn default_page_url() -> String {
    "https://twitch.facepunch.com/".to_string()
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("ledger.json")
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("discovery.json")
}

fn default_tick_secs() -> u64 {
    DEFAULT_TICK_SECS
}

fn default_open_command() -> String {
    "xdg-open".to_string()
}

fn default_process_name() -> String {
    "firefox".to_string()
}

impl WatchConfig {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = WatchConfig::load(&temp.path().join("dropwatch.toml")).unwrap();
        assert_eq!(config.page_url, "https://twitch.facepunch.com/");
        assert_eq!(config.tick_interval_secs, DEFAULT_TICK_SECS);
        assert_eq!(config.browser.open_command, "xdg-open");
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("dropwatch.toml");
        std::fs::write(
            &path,
            "tick_interval_secs = 30\n\n[browser]\nprocess_name = \"chromium\"\n",
        )
        .unwrap();

        let config = WatchConfig::load(&path).unwrap();
        assert_eq!(config.tick_interval_secs, 30);
        assert_eq!(config.browser.process_name, "chromium");
        assert_eq!(config.browser.open_command, "xdg-open");
        assert_eq!(config.ledger_path, PathBuf::from("ledger.json"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("dropwatch.toml");
        std::fs::write(&path, "tick_interval_secs = \"soon\"").unwrap();

        assert!(WatchConfig::load(&path).is_err());
    }
}
