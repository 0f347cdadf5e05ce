#[derive(thiserror::Error, Debug)]
pub enum WatchError {
    #[error("Entry '{0}' is already running")]
    AlreadyRunning(String),

    #[error("Malformed ledger file '{path}': {reason}")]
    MalformedLedger { path: String, reason: String },

    #[error("Tick interval must be a positive number of seconds")]
    InvalidInterval,
}
