//! Error types shared by the persistence layer and the entry form.

use thiserror::Error;

/// Result alias for every attendance store call.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Any failure coming out of SQLite. Causes are deliberately collapsed into a
/// single kind; the wrapped error is kept for the log file.
#[derive(Debug, Error)]
#[error("storage failure: {source}")]
pub struct StoreError {
    #[from]
    source: rusqlite::Error,
}

/// Input rejected by the entry form before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("Please enter a valid LRN")]
    EmptyLrn,
}
