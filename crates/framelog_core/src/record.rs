//! Log record type and payload encoding.

use crate::error::{LogError, LogResult};
use serde::{Deserialize, Serialize};

/// A single log record.
///
/// The `value` is opaque to the log; the `offset` is the logical sequence
/// number the log assigned at append time. Records are stored in the
/// underlying frame store as CBOR payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Opaque record payload.
    pub value: Vec<u8>,
    /// Logical offset assigned by the log.
    #[serde(default)]
    pub offset: u64,
}

impl Record {
    /// Creates a record with an unassigned offset.
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: value.into(),
            offset: 0,
        }
    }

    /// Encodes the record to CBOR bytes.
    ///
    /// # Errors
    ///
    /// Returns a codec error if serialization fails.
    pub fn encode(&self) -> LogResult<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(self, &mut buf).map_err(LogError::codec)?;
        Ok(buf)
    }

    /// Decodes a record from CBOR bytes.
    ///
    /// # Errors
    ///
    /// Returns a codec error if the bytes are not a valid record.
    pub fn decode(bytes: &[u8]) -> LogResult<Self> {
        ciborium::de::from_reader(bytes).map_err(LogError::codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let record = Record {
            value: b"hello world".to_vec(),
            offset: 42,
        };

        let bytes = record.encode().unwrap();
        let decoded = Record::decode(&bytes).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn decode_garbage_fails() {
        let result = Record::decode(&[0xFF, 0x00, 0x13, 0x37]);
        assert!(matches!(result, Err(LogError::Codec { .. })));
    }

    #[test]
    fn empty_value() {
        let record = Record::new(Vec::new());
        let bytes = record.encode().unwrap();
        assert_eq!(Record::decode(&bytes).unwrap(), record);
    }
}
