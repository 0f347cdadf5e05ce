//! Shared types and the dropwatch error taxonomy.

pub mod error;
pub mod time_text;

pub use error::WatchError;
pub use time_text::format_remaining;
