//! Request and response shapes for the produce/consume API.

use framelog_core::Record;
use serde::{Deserialize, Serialize};

/// Request body for producing a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProduceRequest {
    /// The record to append. Any `offset` in the request is ignored; the
    /// log assigns the real one.
    pub record: Record,
}

/// Response body for a successful produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProduceResponse {
    /// The logical offset assigned to the record.
    pub offset: u64,
}

/// Request body for consuming a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumeRequest {
    /// The logical offset to read.
    pub offset: u64,
}

/// Response body for a successful consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumeResponse {
    /// The record at the requested offset, with its assigned offset.
    pub record: Record,
}
