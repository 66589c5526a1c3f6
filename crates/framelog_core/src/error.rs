//! Error types for the log layer.

use framelog_store::StoreError;
use thiserror::Error;

/// Result type for log operations.
pub type LogResult<T> = Result<T, LogError>;

/// Errors that can occur in log operations.
#[derive(Debug, Error)]
pub enum LogError {
    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Record encoding or decoding failed.
    #[error("codec error: {message}")]
    Codec {
        /// Description of the codec failure.
        message: String,
    },

    /// The requested logical offset has not been written.
    #[error("offset out of range: {offset} (next offset is {next})")]
    OffsetOutOfRange {
        /// The requested offset.
        offset: u64,
        /// The next offset the log will assign.
        next: u64,
    },
}

impl LogError {
    pub(crate) fn codec(err: impl std::fmt::Display) -> Self {
        LogError::Codec {
            message: err.to_string(),
        }
    }
}
