//! HTML extraction for the drops schedule page.
//!
//! The page lists each channel as an `a.drop` anchor; live ones additionally
//! carry the `is-live` class. The advertised watch requirement sits in a
//! `div.drop-time span` as whole hours (`"2 Hours"`). Each anchor is parsed
//! independently: a record missing its href, a derivable channel name, or a
//! parseable duration is skipped, never aborting the scan.

use crate::DiscoveredChannel;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Channel identifiers of every anchor marked live.
pub fn parse_live_channels(html: &str) -> HashSet<String> {
    let document = Html::parse_document(html);
    let Some(selector) = Selector::parse("a.drop.is-live").ok() else {
        return HashSet::new();
    };

    document
        .select(&selector)
        .filter_map(|anchor| channel_from_href(anchor.value().attr("href")?))
        .collect()
}

/// Every scheduled channel with its advertised duration, live or not.
pub fn parse_all_channels(html: &str) -> Vec<DiscoveredChannel> {
    let document = Html::parse_document(html);
    let Some(selector) = Selector::parse("a.drop").ok() else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(parse_drop_record)
        .collect()
}

/// Parse one `a.drop` anchor, or `None` to skip it.
fn parse_drop_record(anchor: ElementRef<'_>) -> Option<DiscoveredChannel> {
    let href = anchor.value().attr("href")?;
    let channel = channel_from_href(href)?;
    let hours = advertised_hours(anchor)?;

    Some(DiscoveredChannel {
        channel,
        url: href.to_string(),
        advertised_seconds: hours * 3600,
    })
}

/// Derive the channel identifier from a stream URL: the last path segment,
/// trailing slash trimmed.
fn channel_from_href(href: &str) -> Option<String> {
    let parsed = Url::parse(href.trim_end_matches('/')).ok()?;
    let segment = parsed.path_segments()?.last()?;
    if segment.is_empty() {
        debug!(href, "Skipping anchor with empty channel segment");
        return None;
    }
    Some(segment.to_string())
}

/// Advertised whole-hours figure from the anchor's `div.drop-time span`.
fn advertised_hours(anchor: ElementRef<'_>) -> Option<u64> {
    let selector = Selector::parse("div.drop-time span").ok()?;
    let span = anchor.select(&selector).next()?;
    let text: String = span.text().collect();
    text.split_whitespace().next()?.parse().ok()
}
