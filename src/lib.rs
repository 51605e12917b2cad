//! JRPC - JSON-RPC 2.0 message envelopes
//!
//! This is the convenience crate re-exporting `jrpc-core`. Use it if you want
//! a single dependency for building and classifying JSON-RPC 2.0 messages.
//!
//! # Architecture
//!
//! - **jrpc-core**: Envelope types, error catalog, id validation, builders,
//!   parser and observability setup
//! - **jrpc-cli**: The `jrpc` command-line tool built on top of it
//!
//! # Quick Start - Building
//!
//! ```rust
//! use jrpc::{build_batch, build_notification, build_request};
//! use serde_json::json;
//!
//! let call = build_request(1, "add", Some(json!({"a": 5, "b": 3}))).unwrap();
//! let ping = build_notification("ping", None).unwrap();
//! let batch = build_batch(&[call, ping]);
//! assert!(batch.starts_with('['));
//! ```
//!
//! # Quick Start - Classifying
//!
//! ```rust
//! use jrpc::{parse, Kind};
//!
//! let parsed = parse(r#"[{"jsonrpc":"2.0","result":8,"id":1},{"foo":"boo"}]"#);
//! let kinds: Vec<Kind> = parsed.into_vec().iter().map(|env| env.kind()).collect();
//! assert_eq!(kinds, vec![Kind::Success, Kind::Invalid]);
//! ```

pub use jrpc_core as core;

// Convenience re-exports so callers can write `jrpc::parse` instead of `jrpc::core::parse`
pub use jrpc_core::{
    build_batch, build_error, build_notification, build_request, build_request_auto,
    build_success, error_with, parse, parse_batch, parse_message, parse_reply, parse_request,
    rand_id, validate_id, Envelope, ErrorCode, ErrorObject, Id, Kind, Parsed,
};
