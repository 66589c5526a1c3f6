//! Error types for the produce/consume server.

use framelog_core::LogError;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the produce/consume server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid request format.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The requested offset has not been written.
    #[error("offset not found: {0}")]
    OffsetNotFound(u64),

    /// Log error.
    #[error("log error: {0}")]
    Log(#[from] LogError),
}

impl ServerError {
    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServerError::InvalidRequest(_) | ServerError::OffsetNotFound(_)
        )
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}
