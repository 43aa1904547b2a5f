//! Core Errors

use thiserror::Error;

/// Failure reported by a storage backend.
///
/// The session store never surfaces these to callers; they are logged and
/// treated as "no data".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("storage backend error: {0}")]
    Backend(String),
}
