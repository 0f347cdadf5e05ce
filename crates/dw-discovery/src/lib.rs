//! Discovery of drop channels from the published schedule page.
//!
//! The rotation loop consumes the [`Discovery`] trait; [`DropsPage`] is the
//! real implementation that fetches the schedule page over HTTP and extracts
//! channels from it.

pub mod parse;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::debug;

/// One channel found by the full startup scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredChannel {
    /// Stable channel identifier (last path segment of the stream URL).
    pub channel: String,
    /// Stream URL, passed through to the watch actuator.
    pub url: String,
    /// Advertised watch requirement, whole hours converted to seconds.
    pub advertised_seconds: u64,
}

/// Read-only discovery operations consumed by the rotation loop.
#[async_trait]
pub trait Discovery {
    /// Channels that are live right now. Polled every tick.
    async fn live_channels(&self) -> Result<HashSet<String>>;

    /// Every scheduled channel with its advertised duration. Called once at
    /// startup; records that cannot be parsed are omitted.
    async fn all_channels(&self) -> Result<Vec<DiscoveredChannel>>;
}

/// Discovery against the real schedule page.
pub struct DropsPage {
    client: reqwest::Client,
    page_url: String,
}

impl DropsPage {
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            page_url: page_url.into(),
        }
    }

    async fn fetch_page(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.page_url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch schedule page: {}", self.page_url))?;
        let body = response
            .error_for_status()
            .with_context(|| format!("Schedule page returned an error: {}", self.page_url))?
            .text()
            .await
            .context("Failed to read schedule page body")?;
        Ok(body)
    }
}

#[async_trait]
impl Discovery for DropsPage {
    async fn live_channels(&self) -> Result<HashSet<String>> {
        let html = self.fetch_page().await?;
        let live = parse::parse_live_channels(&html);
        debug!(live = live.len(), "Live channel poll complete");
        Ok(live)
    }

    async fn all_channels(&self) -> Result<Vec<DiscoveredChannel>> {
        let html = self.fetch_page().await?;
        let channels = parse::parse_all_channels(&html);
        debug!(channels = channels.len(), "Full discovery scan complete");
        Ok(channels)
    }
}
