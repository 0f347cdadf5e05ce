//! Candidate selection: which live channel to watch next.

use crate::entry::WatchEntry;
use dw_core::format_remaining;
use std::collections::HashSet;
use std::time::Duration;
use tracing::info;

/// Pick the next entry to watch, as an index into `entries`.
///
/// Offline entries and entries with no remaining time are never selected.
/// Among the rest, the one with the least remaining time wins; ties go to the
/// entry listed first in the ledger, which keeps the choice deterministic
/// across ticks.
pub fn select_next(entries: &[WatchEntry], live: &HashSet<String>) -> Option<usize> {
    let (online, offline): (Vec<usize>, Vec<usize>) =
        (0..entries.len()).partition(|&i| live.contains(&entries[i].channel));

    log_listing("Online", &online, entries);
    log_listing("Offline", &offline, entries);

    online
        .into_iter()
        .filter(|&i| entries[i].current_remaining() > Duration::ZERO)
        .min_by_key(|&i| entries[i].current_remaining())
}

/// Diagnostic listing of a partition, sorted by ascending remaining time.
fn log_listing(label: &str, indices: &[usize], entries: &[WatchEntry]) {
    let mut sorted: Vec<&WatchEntry> = indices.iter().map(|&i| &entries[i]).collect();
    sorted.sort_by_key(|e| e.current_remaining());

    let listing: String = sorted
        .iter()
        .map(|e| format!("{} {}; ", e.channel, format_remaining(e.current_remaining())))
        .collect();
    info!("{label}: {listing}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(remaining: &[(&str, u64)]) -> Vec<WatchEntry> {
        remaining
            .iter()
            .map(|(name, secs)| WatchEntry::new(*name, format!("https://twitch.tv/{name}"), *secs))
            .collect()
    }

    fn live(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_picks_smallest_remaining() {
        let entries = entries(&[("a", 50), ("b", 10), ("c", 30)]);
        let live = live(&["a", "b", "c"]);
        assert_eq!(select_next(&entries, &live), Some(1));
    }

    #[test]
    fn test_tie_goes_to_ledger_order() {
        let entries = entries(&[("a", 20), ("b", 20)]);
        let live = live(&["a", "b"]);
        assert_eq!(select_next(&entries, &live), Some(0));
    }

    #[test]
    fn test_offline_entries_are_never_selected() {
        let entries = entries(&[("a", 10), ("b", 50)]);
        let live = live(&["b"]);
        assert_eq!(select_next(&entries, &live), Some(1));
    }

    #[test]
    fn test_exhausted_entries_are_never_selected() {
        let entries = entries(&[("a", 0), ("b", 50)]);
        let live = live(&["a", "b"]);
        assert_eq!(select_next(&entries, &live), Some(1));
    }

    #[test]
    fn test_empty_live_set_selects_nothing() {
        let entries = entries(&[("a", 10), ("b", 50)]);
        assert_eq!(select_next(&entries, &HashSet::new()), None);
    }

    #[test]
    fn test_all_exhausted_selects_nothing() {
        let entries = entries(&[("a", 0), ("b", 0)]);
        let live = live(&["a", "b"]);
        assert_eq!(select_next(&entries, &live), None);
    }

    #[test]
    fn test_live_channel_missing_from_ledger_is_ignored() {
        let entries = entries(&[("a", 10)]);
        let live = live(&["unknown"]);
        assert_eq!(select_next(&entries, &live), None);
    }
}
