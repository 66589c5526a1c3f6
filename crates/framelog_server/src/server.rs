//! The produce/consume server.

use crate::api::{ConsumeRequest, ConsumeResponse, ProduceRequest, ProduceResponse};
use crate::error::{ServerError, ServerResult};
use framelog_core::{Log, LogError};
use std::sync::Arc;

/// The produce/consume server over a shared [`Log`].
///
/// Handler methods are transport-agnostic; the HTTP wiring in
/// [`crate::http`] calls into them. This keeps the request semantics
/// testable without sockets.
///
/// # Example
///
/// ```no_run
/// use framelog_core::{Log, Record};
/// use framelog_server::{LogServer, ProduceRequest};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let log = Arc::new(Log::open(Path::new("records.log")).unwrap());
/// let server = LogServer::new(log);
/// let response = server
///     .handle_produce(ProduceRequest { record: Record::new(b"hello".to_vec()) })
///     .unwrap();
/// assert_eq!(response.offset, 0);
/// ```
pub struct LogServer {
    log: Arc<Log>,
}

impl LogServer {
    /// Creates a server over the given log.
    pub fn new(log: Arc<Log>) -> Self {
        Self { log }
    }

    /// Handles a produce request: appends the record's value and returns
    /// the assigned logical offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the log append fails.
    pub fn handle_produce(&self, request: ProduceRequest) -> ServerResult<ProduceResponse> {
        let offset = self.log.append(request.record.value)?;
        tracing::debug!(offset, "produced record");
        Ok(ProduceResponse { offset })
    }

    /// Handles a consume request: reads the record at the requested
    /// logical offset.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::OffsetNotFound`] for offsets that have not
    /// been written, or an error if the log read fails.
    pub fn handle_consume(&self, request: ConsumeRequest) -> ServerResult<ConsumeResponse> {
        let record = self.log.read(request.offset).map_err(|e| match e {
            LogError::OffsetOutOfRange { offset, .. } => ServerError::OffsetNotFound(offset),
            other => ServerError::Log(other),
        })?;

        Ok(ConsumeResponse { record })
    }

    /// Returns the shared log.
    pub fn log(&self) -> &Arc<Log> {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framelog_core::Record;
    use tempfile::tempdir;

    fn make_server(dir: &tempfile::TempDir) -> LogServer {
        let log = Log::open(&dir.path().join("records.log")).unwrap();
        LogServer::new(Arc::new(log))
    }

    #[test]
    fn produce_then_consume() {
        let dir = tempdir().unwrap();
        let server = make_server(&dir);

        let response = server
            .handle_produce(ProduceRequest {
                record: Record::new(b"hello world".to_vec()),
            })
            .unwrap();
        assert_eq!(response.offset, 0);

        let response = server
            .handle_consume(ConsumeRequest { offset: 0 })
            .unwrap();
        assert_eq!(response.record.value, b"hello world");
        assert_eq!(response.record.offset, 0);
    }

    #[test]
    fn produce_assigns_sequential_offsets() {
        let dir = tempdir().unwrap();
        let server = make_server(&dir);

        for i in 0..3u64 {
            let response = server
                .handle_produce(ProduceRequest {
                    record: Record::new(format!("value-{i}").into_bytes()),
                })
                .unwrap();
            assert_eq!(response.offset, i);
        }
    }

    #[test]
    fn request_offset_is_ignored_on_produce() {
        let dir = tempdir().unwrap();
        let server = make_server(&dir);

        let response = server
            .handle_produce(ProduceRequest {
                record: Record {
                    value: b"x".to_vec(),
                    offset: 999,
                },
            })
            .unwrap();
        assert_eq!(response.offset, 0);
    }

    #[test]
    fn consume_unknown_offset_is_client_error() {
        let dir = tempdir().unwrap();
        let server = make_server(&dir);

        let err = server
            .handle_consume(ConsumeRequest { offset: 5 })
            .unwrap_err();
        assert!(matches!(err, ServerError::OffsetNotFound(5)));
        assert!(err.is_client_error());
    }

    #[test]
    fn shared_log() {
        let dir = tempdir().unwrap();
        let log = Arc::new(Log::open(&dir.path().join("records.log")).unwrap());
        let server = LogServer::new(Arc::clone(&log));

        server
            .handle_produce(ProduceRequest {
                record: Record::new(b"via server".to_vec()),
            })
            .unwrap();

        assert_eq!(log.len(), 1);
    }
}
