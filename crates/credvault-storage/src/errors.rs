//! Error types for record store backends.

use thiserror::Error;

/// Errors surfaced by [`KeyValueStore`](crate::KeyValueStore) backends.
///
/// `Invalidated` is a sentinel: it reports that a record exists but has
/// been administratively invalidated, without returning its contents. The
/// database facade collapses it into the same not-found surface callers
/// see for truly absent records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A record already exists under this key hash.
    #[error("record already exists")]
    AlreadyExists,

    /// The record exists but has been invalidated.
    #[error("record has been invalidated")]
    Invalidated,

    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;
