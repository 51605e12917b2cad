//! Error types and the reserved JSON-RPC error catalog
//!
//! This module provides two layers of error handling:
//!
//! - **ErrorObject**: The wire-format error object (`code`, `message`, `data`)
//!   carried in error replies and attached to invalid envelopes
//! - **Error**: Library-internal failures while encoding or decoding (uses thiserror)
//!
//! # Reserved Error Codes
//!
//! JSON-RPC 2.0 reserves these codes, modelled here by [`ErrorCode`]:
//! - `-32700`: Parse error (invalid JSON)
//! - `-32600`: Invalid Request (valid JSON, not a valid envelope)
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! The catalog is a closed enum with `const` lookups, so entries cannot be
//! altered at runtime. Every accessor returns a fresh [`ErrorObject`].
//!
//! # Examples
//!
//! ```rust
//! use jrpc_core::{ErrorCode, ErrorObject};
//! use serde_json::json;
//!
//! let err = ErrorObject::method_not_found(Some(json!("frobnicate")));
//! assert_eq!(err.code, -32601);
//! assert_eq!(err.message, "Method not found");
//! assert_eq!(err.reserved(), Some(ErrorCode::MethodNotFound));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type for internal encode/decode operations
pub type Result<T> = std::result::Result<T, Error>;

/// Code used by [`ErrorObject::from_error`] for errors raised by native code
pub const NATIVE_ERROR_CODE: i64 = -32701;

/// Library-internal error type
///
/// Public constructors and parsers never surface this type directly; it is
/// folded into an [`ErrorObject`] at the API boundary via `From`.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A value could not be encoded as JSON
    ///
    /// Maps to Internal error (-32603) with the diagnostic as `data`.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Text could not be decoded as JSON
    ///
    /// Maps to Parse error (-32700) with the diagnostic as `data`.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<Error> for ErrorObject {
    fn from(err: Error) -> Self {
        match err {
            Error::Serialization(msg) => ErrorObject::internal_error(Some(Value::String(msg))),
            Error::Decode(msg) => ErrorObject::parse_error(Some(Value::String(msg))),
        }
    }
}

/// Reserved JSON-RPC 2.0 error conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed JSON text
    ParseError,
    /// Valid JSON that is not a valid envelope
    InvalidRequest,
    /// Unknown method (raised by the dispatching application)
    MethodNotFound,
    /// Bad method parameters (raised by the dispatching application)
    InvalidParams,
    /// Unexpected failure while building or encoding a message
    InternalError,
}

impl ErrorCode {
    /// Every reserved entry, in code order
    pub const ALL: [ErrorCode; 5] = [
        ErrorCode::ParseError,
        ErrorCode::InvalidRequest,
        ErrorCode::MethodNotFound,
        ErrorCode::InvalidParams,
        ErrorCode::InternalError,
    ];

    /// Numeric code of this entry
    pub const fn code(self) -> i64 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
        }
    }

    /// Canonical message of this entry
    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
        }
    }

    /// Look up the reserved entry for a numeric code
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|entry| entry.code() == code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

/// JSON-RPC 2.0 error object
///
/// This is the exact wire shape of the `error` member of an error reply.
/// `data` is omitted from the encoded form when absent.
///
/// Reserved conditions are built with the catalog accessors
/// ([`parse_error`](Self::parse_error), [`invalid_request`](Self::invalid_request), ...);
/// application-defined codes use [`error_with`] or [`ErrorObject::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Numeric error code
    pub code: i64,

    /// Short description of the error
    pub message: String,

    /// Optional free-form payload (for example a decoder diagnostic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorObject {
    /// Create an error object without data
    ///
    /// ```rust
    /// use jrpc_core::ErrorObject;
    ///
    /// let err = ErrorObject::new(-32000, "Database unavailable");
    /// assert!(err.data.is_none());
    /// ```
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Build the catalog entry for a reserved condition
    pub fn catalog(entry: ErrorCode, data: Option<Value>) -> Self {
        Self {
            code: entry.code(),
            message: entry.message().to_string(),
            data,
        }
    }

    /// Parse error (-32700): the text is not valid JSON
    pub fn parse_error(data: Option<Value>) -> Self {
        Self::catalog(ErrorCode::ParseError, data)
    }

    /// Invalid Request (-32600): the JSON is not a valid envelope
    pub fn invalid_request(data: Option<Value>) -> Self {
        Self::catalog(ErrorCode::InvalidRequest, data)
    }

    /// Method not found (-32601)
    pub fn method_not_found(data: Option<Value>) -> Self {
        Self::catalog(ErrorCode::MethodNotFound, data)
    }

    /// Invalid params (-32602)
    pub fn invalid_params(data: Option<Value>) -> Self {
        Self::catalog(ErrorCode::InvalidParams, data)
    }

    /// Internal error (-32603)
    pub fn internal_error(data: Option<Value>) -> Self {
        Self::catalog(ErrorCode::InternalError, data)
    }

    /// Wrap a native error, using its display text as the message
    ///
    /// The code is [`NATIVE_ERROR_CODE`].
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        Self::new(NATIVE_ERROR_CODE, err.to_string())
    }

    /// The reserved entry this object's code belongs to, if any
    pub fn reserved(&self) -> Option<ErrorCode> {
        ErrorCode::from_code(self.code)
    }

    /// Check whether this object carries the given reserved code
    pub fn is(&self, entry: ErrorCode) -> bool {
        self.code == entry.code()
    }
}

/// Build an error object with an arbitrary code, message and optional data
///
/// ```rust
/// use jrpc_core::error_with;
/// use serde_json::json;
///
/// let err = error_with(1001, "Insufficient funds", Some(json!({"balance": 50})));
/// assert_eq!(err.code, 1001);
/// assert_eq!(err.data.unwrap()["balance"], 50);
/// ```
pub fn error_with(code: i64, message: impl Into<String>, data: Option<Value>) -> ErrorObject {
    ErrorObject {
        code,
        message: message.into(),
        data,
    }
}

impl fmt::Display for ErrorObject {
    /// Formats as "[code] message", e.g. "[-32601] Method not found"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorObject {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_messages() {
        assert_eq!(ErrorObject::parse_error(None).message, "Parse error");
        assert_eq!(ErrorObject::invalid_request(None).message, "Invalid Request");
        assert_eq!(ErrorObject::method_not_found(None).message, "Method not found");
        assert_eq!(ErrorObject::invalid_params(None).message, "Invalid params");
        assert_eq!(ErrorObject::internal_error(None).message, "Internal error");
    }

    #[test]
    fn test_all_reserved_codes() {
        let expected = [-32700, -32600, -32601, -32602, -32603];
        for (entry, code) in ErrorCode::ALL.iter().zip(expected) {
            assert_eq!(entry.code(), code);
            assert_eq!(ErrorCode::from_code(code), Some(*entry));
        }
        assert_eq!(ErrorCode::from_code(1), None);
        assert_eq!(ErrorCode::from_code(NATIVE_ERROR_CODE), None);
    }

    #[test]
    fn test_catalog_accessors_are_fresh() {
        let mut first = ErrorObject::parse_error(None);
        first.message.push_str(" (edited)");
        assert_eq!(ErrorObject::parse_error(None).message, "Parse error");
    }

    #[test]
    fn test_catalog_with_data() {
        let err = ErrorObject::parse_error(Some(json!("expected value at line 1 column 1")));
        assert_eq!(err.code, -32700);
        assert_eq!(err.data, Some(json!("expected value at line 1 column 1")));
    }

    #[test]
    fn test_error_with() {
        let err = error_with(1, "test", None);
        assert_eq!(err.code, 1);
        assert_eq!(err.message, "test");
        assert!(err.data.is_none());
        assert_eq!(err.reserved(), None);

        let err = error_with(1, "test", Some(json!("xx")));
        assert_eq!(err.data, Some(json!("xx")));
    }

    #[test]
    fn test_from_native_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = ErrorObject::from_error(&io);
        assert_eq!(err.code, NATIVE_ERROR_CODE);
        assert_eq!(err.message, "disk on fire");
    }

    #[test]
    fn test_display() {
        let err = ErrorObject::method_not_found(None);
        assert_eq!(err.to_string(), "[-32601] Method not found");
        assert_eq!(ErrorCode::InternalError.to_string(), "[-32603] Internal error");
    }

    #[test]
    fn test_serialization_omits_missing_data() {
        let encoded = serde_json::to_string(&error_with(1, "test", None)).unwrap();
        assert_eq!(encoded, r#"{"code":1,"message":"test"}"#);

        let encoded = serde_json::to_string(&error_with(1, "test", Some(json!("xx")))).unwrap();
        assert_eq!(encoded, r#"{"code":1,"message":"test","data":"xx"}"#);
    }

    #[test]
    fn test_deserialization() {
        let err: ErrorObject =
            serde_json::from_str(r#"{"code":-32601,"message":"Method not found"}"#).unwrap();
        assert!(err.is(ErrorCode::MethodNotFound));
        assert!(err.data.is_none());

        let bad = serde_json::from_str::<ErrorObject>(r#"{"code":"x","message":"m"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_internal_error_conversion() {
        let obj: ErrorObject = Error::Serialization("boom".into()).into();
        assert!(obj.is(ErrorCode::InternalError));
        assert_eq!(obj.data, Some(json!("boom")));

        let obj: ErrorObject = Error::Decode("eof".into()).into();
        assert!(obj.is(ErrorCode::ParseError));
    }
}
