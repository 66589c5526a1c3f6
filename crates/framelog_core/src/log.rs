//! The log: dense logical offsets over store positions.

use crate::error::{LogError, LogResult};
use crate::record::Record;
use framelog_store::{Store, LEN_WIDTH};
use parking_lot::Mutex;
use std::path::Path;

/// An append-only record log over a frame [`Store`].
///
/// The log assigns each appended record a dense logical offset (0, 1, 2, …)
/// and keeps an in-memory table mapping offsets to the store positions the
/// records occupy. The store itself knows nothing about offsets; the table
/// is rebuilt on open by walking the file's frame length prefixes.
pub struct Log {
    store: Store,
    /// Logical offset → store position of the record's frame.
    positions: Mutex<Vec<u64>>,
}

impl Log {
    /// Creates a log over an existing store, rebuilding the position table
    /// from the frames already on disk.
    ///
    /// A trailing frame whose declared length extends past the file's size
    /// (a crash mid-append) ends the scan; the preceding complete frames
    /// remain readable.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be scanned.
    pub fn new(store: Store) -> LogResult<Self> {
        let size = store.size()?;
        let mut positions = Vec::new();
        let mut position = 0u64;

        while position + LEN_WIDTH <= size {
            let mut prefix = [0u8; LEN_WIDTH as usize];
            let n = store.read_at(&mut prefix, position)?;
            if n < LEN_WIDTH as usize {
                break;
            }

            let len = u64::from_be_bytes(prefix);
            if position + LEN_WIDTH + len > size {
                // Partial trailing frame; treat as clean end-of-log.
                break;
            }

            positions.push(position);
            position += LEN_WIDTH + len;
        }

        tracing::debug!(frames = positions.len(), size, "rebuilt position table");

        Ok(Self {
            store,
            positions: Mutex::new(positions),
        })
    }

    /// Opens or creates a log file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or scanned.
    pub fn open(path: &Path) -> LogResult<Self> {
        Self::new(Store::open(path)?)
    }

    /// Appends a value, returning the logical offset assigned to it.
    ///
    /// Offset assignment and the store append happen in one critical
    /// section, so offsets are dense and ordered even under concurrent
    /// appends.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store append fails.
    pub fn append(&self, value: impl Into<Vec<u8>>) -> LogResult<u64> {
        let mut positions = self.positions.lock();
        let offset = positions.len() as u64;

        let record = Record {
            value: value.into(),
            offset,
        };
        let payload = record.encode()?;

        let (_, position) = self.store.append(&payload)?;
        positions.push(position);

        tracing::trace!(offset, position, "appended record");
        Ok(offset)
    }

    /// Reads the record at the given logical offset.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::OffsetOutOfRange`] for offsets that have not
    /// been written, or an error if the store read or decoding fails.
    pub fn read(&self, offset: u64) -> LogResult<Record> {
        let position = {
            let positions = self.positions.lock();
            *positions
                .get(offset as usize)
                .ok_or(LogError::OffsetOutOfRange {
                    offset,
                    next: positions.len() as u64,
                })?
        };

        let payload = self.store.read(position)?;
        Record::decode(&payload)
    }

    /// The next offset the log will assign.
    pub fn next_offset(&self) -> u64 {
        self.positions.lock().len() as u64
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.positions.lock().len()
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.positions.lock().is_empty()
    }

    /// Flushes buffered appends to the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the store flush fails.
    pub fn flush(&self) -> LogResult<()> {
        self.store.flush()?;
        Ok(())
    }

    /// Flushes and syncs the store to stable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the store sync fails.
    pub fn sync(&self) -> LogResult<()> {
        self.store.sync()?;
        Ok(())
    }

    /// Flushes and closes the underlying store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store close fails.
    pub fn close(&self) -> LogResult<()> {
        self.store.close()?;
        Ok(())
    }
}

impl std::fmt::Debug for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Log")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn append_assigns_dense_offsets() {
        let dir = tempdir().unwrap();
        let log = Log::open(&dir.path().join("records.log")).unwrap();

        for i in 0..5u64 {
            let offset = log.append(format!("value-{i}").into_bytes()).unwrap();
            assert_eq!(offset, i);
        }

        assert_eq!(log.len(), 5);
        assert_eq!(log.next_offset(), 5);
    }

    #[test]
    fn read_round_trip() {
        let dir = tempdir().unwrap();
        let log = Log::open(&dir.path().join("records.log")).unwrap();

        log.append(b"first".to_vec()).unwrap();
        log.append(b"second".to_vec()).unwrap();

        let record = log.read(0).unwrap();
        assert_eq!(record.value, b"first");
        assert_eq!(record.offset, 0);

        let record = log.read(1).unwrap();
        assert_eq!(record.value, b"second");
        assert_eq!(record.offset, 1);
    }

    #[test]
    fn read_out_of_range() {
        let dir = tempdir().unwrap();
        let log = Log::open(&dir.path().join("records.log")).unwrap();
        log.append(b"only".to_vec()).unwrap();

        let result = log.read(7);
        assert!(matches!(
            result,
            Err(LogError::OffsetOutOfRange { offset: 7, next: 1 })
        ));
    }

    #[test]
    fn reopen_rebuilds_offsets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.log");

        {
            let log = Log::open(&path).unwrap();
            for i in 0..3u64 {
                log.append(format!("value-{i}").into_bytes()).unwrap();
            }
            log.close().unwrap();
        }

        let log = Log::open(&path).unwrap();
        assert_eq!(log.len(), 3);

        for i in 0..3u64 {
            let record = log.read(i).unwrap();
            assert_eq!(record.value, format!("value-{i}").into_bytes());
            assert_eq!(record.offset, i);
        }

        // Appends continue from the recovered offset.
        assert_eq!(log.append(b"more".to_vec()).unwrap(), 3);
    }

    #[test]
    fn reopen_ignores_partial_trailing_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.log");

        {
            let log = Log::open(&path).unwrap();
            log.append(b"kept".to_vec()).unwrap();
            log.append(b"also kept".to_vec()).unwrap();
            log.close().unwrap();
        }

        // Simulate a crash mid-append: a length prefix promising more
        // bytes than the file holds.
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap();
        file.write_all(&100u64.to_be_bytes()).unwrap();
        file.write_all(b"trunc").unwrap();
        drop(file);

        let log = Log::open(&path).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.read(0).unwrap().value, b"kept");
        assert_eq!(log.read(1).unwrap().value, b"also kept");
    }

    #[test]
    fn empty_log() {
        let dir = tempdir().unwrap();
        let log = Log::open(&dir.path().join("records.log")).unwrap();

        assert!(log.is_empty());
        assert_eq!(log.next_offset(), 0);
        assert!(matches!(
            log.read(0),
            Err(LogError::OffsetOutOfRange { .. })
        ));
    }
}
