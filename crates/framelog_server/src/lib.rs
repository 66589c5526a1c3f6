//! # framelog server
//!
//! HTTP/JSON produce/consume transport over a framelog [`framelog_core::Log`].
//!
//! The transport exposes two operations on `/`:
//!
//! - `POST /` — produce: append a record, returning its logical offset
//! - `GET /` — consume: read the record at a logical offset
//!
//! Request semantics live in [`LogServer`], which is transport-agnostic and
//! directly testable; [`http::router`] and [`http::serve`] provide the axum
//! wiring.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod error;
pub mod http;
mod server;

pub use api::{ConsumeRequest, ConsumeResponse, ProduceRequest, ProduceResponse};
pub use error::{ServerError, ServerResult};
pub use server::LogServer;
