//! JSON-RPC 2.0 message envelopes
//!
//! This crate builds and classifies JSON-RPC 2.0 messages. It includes:
//!
//! - **Types**: The classified [`Envelope`] (request, notification, success,
//!   error, invalid) and the message [`Id`]
//! - **Error catalog**: The reserved error codes and the wire [`ErrorObject`]
//! - **Id validation**: The legal id domain, shared by both directions
//! - **Builders**: Encoding requests, notifications, replies and batches
//! - **Parser**: Classifying arbitrary text into envelopes
//! - **Observability**: Optional tracing subscriber and OTLP export setup
//!
//! # Architecture
//!
//! Everything here is a pure function of its arguments: there is no shared
//! state and no I/O, so any number of calls may run concurrently. Transport,
//! sessions and method dispatch are left to the caller.
//!
//! Failures are returned as values. Builders return
//! `Result<String, ErrorObject>`; parsers return [`Envelope::Invalid`]
//! carrying the catalog entry that explains the failure.
//!
//! # Example
//!
//! ```rust
//! use jrpc_core::{build_success, parse, Kind};
//! use serde_json::json;
//!
//! let text = build_success("123", json!({"sum": 7})).unwrap();
//!
//! let env = parse(&text).single().unwrap();
//! assert_eq!(env.kind(), Kind::Success);
//! assert_eq!(env.result(), Some(&json!({"sum": 7})));
//! ```

pub mod builder;
pub mod codec;
pub mod error;
pub mod id;
pub mod idgen;
pub mod observability;
pub mod parser;
pub mod types;

// Re-export the most commonly used items so callers can write `jrpc_core::parse`
pub use builder::{
    build_batch, build_error, build_notification, build_request, build_request_auto,
    build_success,
};
pub use error::{error_with, Error, ErrorCode, ErrorObject, Result};
pub use id::{validate_id, InvalidId};
pub use idgen::{rand_id, rand_request_id};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use parser::{classify, parse, parse_batch, parse_message, parse_reply, parse_request, Parsed};
pub use types::{
    Envelope, ErrorReply, Id, Invalid, Kind, Notification, Request, Success, JSONRPC_VERSION,
};
