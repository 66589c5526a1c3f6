//! # framelog core
//!
//! The commit-log abstraction over the framelog frame store.
//!
//! A [`Log`] assigns dense logical offsets to appended records and maps
//! them to byte positions in a single append-only store file. Records are
//! CBOR-encoded [`Record`] values; the store below treats them as opaque
//! payload bytes.
//!
//! ## Example
//!
//! ```no_run
//! use framelog_core::Log;
//! use std::path::Path;
//!
//! let log = Log::open(Path::new("records.log")).unwrap();
//! let offset = log.append(b"hello world".to_vec()).unwrap();
//! let record = log.read(offset).unwrap();
//! assert_eq!(record.value, b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod log;
mod record;

pub use error::{LogError, LogResult};
pub use log::Log;
pub use record::Record;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
