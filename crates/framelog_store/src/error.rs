//! Error types for store operations.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    ///
    /// Reads past the end of the file surface here as the underlying
    /// positional read's error (unexpected EOF), not as a distinct kind.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The store has been closed.
    #[error("store is closed")]
    Closed,
}
