//! # framelog store
//!
//! The single-file, append-only byte store underlying framelog.
//!
//! The store persists variable-length payloads as length-prefixed *frames*
//! and hands back the byte *position* of each frame as a stable handle for
//! positional reads. It owns exactly one file, one write buffer, and one
//! running size counter, all behind a single lock.
//!
//! ## On-disk format
//!
//! ```text
//! | length: u64 big-endian (8) | payload (length) | ... next frame ...
//! ```
//!
//! No file header, no footer, no checksums, no frame count. The store does
//! not interpret payload bytes; record serialization belongs to the layers
//! above (see `framelog_core`).
//!
//! ## Example
//!
//! ```no_run
//! use framelog_store::Store;
//! use std::path::Path;
//!
//! let store = Store::open(Path::new("segment.store")).unwrap();
//! let (_, pos) = store.append(b"hello world").unwrap();
//! assert_eq!(store.read(pos).unwrap(), b"hello world");
//! store.close().unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod store;

pub use error::{StoreError, StoreResult};
pub use store::{Store, LEN_WIDTH};
