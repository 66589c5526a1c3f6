//! The append-only frame store.

use crate::error::{StoreError, StoreResult};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Width in bytes of the big-endian length prefix that starts every frame.
pub const LEN_WIDTH: u64 = 8;

#[derive(Debug)]
struct Inner {
    /// `None` once the store has been closed.
    writer: Option<BufWriter<File>>,
    /// Bytes appended so far, counting buffered bytes not yet on disk.
    size: u64,
}

/// A single-file, append-only byte store.
///
/// The store persists variable-length payloads as *frames*: an 8-byte
/// big-endian length prefix immediately followed by the payload bytes.
/// Frames are packed contiguously with no header, footer, separators, or
/// checksums. The byte offset of a frame's length prefix is its *position*,
/// a stable handle for reading the payload back.
///
/// # Durability
///
/// Appends land in an in-memory write buffer; they become visible to direct
/// file reads only after a flush. Every read path flushes first, so a
/// payload is always readable through this store immediately after its
/// append returns. [`Store::close`] flushes and syncs before releasing the
/// file handle.
///
/// # Thread Safety
///
/// All state sits behind one mutex; every operation is a single critical
/// section, so appends never interleave and reads never observe a
/// half-written frame.
///
/// # Known limitation
///
/// A crash between the length write and the payload write can leave a
/// trailing partial frame. There is no checksum to detect it; detection and
/// repair are the caller's concern.
///
/// # Example
///
/// ```no_run
/// use framelog_store::Store;
/// use std::path::Path;
///
/// let store = Store::open(Path::new("segment.store")).unwrap();
/// let (written, pos) = store.append(b"hello world").unwrap();
/// assert_eq!(written, 19);
/// assert_eq!(store.read(pos).unwrap(), b"hello world");
/// ```
#[derive(Debug)]
pub struct Store {
    inner: Mutex<Inner>,
}

impl Store {
    /// Creates a store over an already-open file.
    ///
    /// The running size is initialized from the file's current length, so a
    /// store constructed over a previously written file continues appending
    /// exactly where the file left off.
    ///
    /// # Errors
    ///
    /// Returns an error if the file's length cannot be determined.
    pub fn new(file: File) -> StoreResult<Self> {
        let size = file.metadata()?.len();

        Ok(Self {
            inner: Mutex::new(Inner {
                writer: Some(BufWriter::new(file)),
                size,
            }),
        })
    }

    /// Opens or creates a store file at the given path.
    ///
    /// An existing file is opened for reading and appending without
    /// truncation; a missing file is created empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        Self::new(file)
    }

    /// Appends a payload as one frame.
    ///
    /// Returns `(bytes_written, position)` where `bytes_written` is
    /// `LEN_WIDTH + payload.len()` and `position` is the byte offset of the
    /// frame's length prefix. A failed append leaves the store's size
    /// untouched, as if the call never happened.
    ///
    /// The frame may reside only in the write buffer until the next flush;
    /// see the type-level durability notes.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails, or [`StoreError::Closed`]
    /// after [`Store::close`].
    pub fn append(&self, payload: &[u8]) -> StoreResult<(u64, u64)> {
        let mut inner = self.inner.lock();
        let position = inner.size;

        let writer = inner.writer.as_mut().ok_or(StoreError::Closed)?;

        // Reads leave the file cursor wherever the positional read ended.
        // The buffer is only ever empty right after such a flush, so
        // reposition to the append point before buffering new bytes.
        if writer.buffer().is_empty() {
            writer.get_mut().seek(SeekFrom::Start(position))?;
        }

        writer.write_all(&(payload.len() as u64).to_be_bytes())?;
        writer.write_all(payload)?;

        let written = LEN_WIDTH + payload.len() as u64;
        inner.size += written;

        Ok((written, position))
    }

    /// Reads back the full payload of the frame at `position`.
    ///
    /// Flushes the write buffer, reads the 8-byte length prefix at
    /// `position`, then reads that many payload bytes at
    /// `position + LEN_WIDTH`. The length is always re-derived from the
    /// frame itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush or either read fails. A position
    /// beyond the written content fails with the underlying read's
    /// unexpected-EOF error.
    pub fn read(&self, position: u64) -> StoreResult<Vec<u8>> {
        let mut inner = self.inner.lock();
        let writer = inner.writer.as_mut().ok_or(StoreError::Closed)?;
        writer.flush()?;

        let file = writer.get_mut();
        file.seek(SeekFrom::Start(position))?;

        let mut prefix = [0u8; LEN_WIDTH as usize];
        file.read_exact(&mut prefix)?;
        let len = u64::from_be_bytes(prefix);

        let mut payload = vec![0u8; len as usize];
        file.read_exact(&mut payload)?;

        Ok(payload)
    }

    /// Performs a raw positional read into `buf` starting at `offset`.
    ///
    /// Returns the number of bytes read, which is less than `buf.len()` when
    /// the read runs into end-of-file. This bypasses framing entirely and is
    /// not required to land on frame boundaries; it exists for callers that
    /// already know offsets and lengths, such as bulk range export.
    ///
    /// Like [`Store::read`], this flushes the write buffer first so buffered
    /// appends are visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush or the underlying read fails.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> StoreResult<usize> {
        let mut inner = self.inner.lock();
        let writer = inner.writer.as_mut().ok_or(StoreError::Closed)?;
        writer.flush()?;

        let file = writer.get_mut();
        file.seek(SeekFrom::Start(offset))?;

        let mut read = 0;
        while read < buf.len() {
            let n = file.read(&mut buf[read..])?;
            if n == 0 {
                break;
            }
            read += n;
        }

        Ok(read)
    }

    /// Flushes buffered appends to the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn flush(&self) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let writer = inner.writer.as_mut().ok_or(StoreError::Closed)?;
        writer.flush()?;
        Ok(())
    }

    /// Flushes buffered appends and syncs file contents and metadata to
    /// stable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush or sync fails.
    pub fn sync(&self) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let writer = inner.writer.as_mut().ok_or(StoreError::Closed)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }

    /// Returns the store's logical size in bytes.
    ///
    /// This counts buffered bytes and is the position the next append will
    /// return.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`] after [`Store::close`].
    pub fn size(&self) -> StoreResult<u64> {
        let inner = self.inner.lock();
        if inner.writer.is_none() {
            return Err(StoreError::Closed);
        }
        Ok(inner.size)
    }

    /// Flushes buffered appends, syncs, and releases the file handle.
    ///
    /// Every operation after a successful close fails with
    /// [`StoreError::Closed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the flush or sync fails, or
    /// [`StoreError::Closed`] if the store was already closed.
    pub fn close(&self) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let writer = inner.writer.take().ok_or(StoreError::Closed)?;

        let file = writer
            .into_inner()
            .map_err(|e| StoreError::Io(e.into_error()))?;
        file.sync_all()?;

        Ok(())
    }
}
