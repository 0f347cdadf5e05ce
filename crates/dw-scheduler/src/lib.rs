//! Rotation scheduler: time-tracked entries, candidate selection, ledger
//! persistence, and the tick loop that ties them together.

pub mod entry;
pub mod ledger;
pub mod rotation;
pub mod selector;

pub use entry::WatchEntry;
pub use ledger::{Ledger, write_discovery_snapshot};
pub use rotation::{Rotator, WatchState};
pub use selector::select_next;
