//! Id validation
//!
//! A legal id is a string, an integer-valued number, or null/absent. The same
//! rule guards both directions: constructors reject an illegal id before
//! encoding, and the classifier rejects one before trusting a decoded message.
//! The two sides report the failure under different catalog entries, so this
//! module returns a plain [`InvalidId`] and leaves the mapping to the caller.

use crate::error::{ErrorCode, ErrorObject};
use crate::types::Id;
use serde_json::{Number, Value};
use thiserror::Error;

/// Reason attached to every rejected id
pub const INVALID_ID_REASON: &str =
    "invalid id that MUST contain a String, Number, or NULL value";

/// An id outside the legal domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", INVALID_ID_REASON)]
pub struct InvalidId {
    found: &'static str,
}

impl InvalidId {
    /// The JSON kind that was rejected, e.g. `"boolean"` or `"fractional number"`
    pub fn found(&self) -> &'static str {
        self.found
    }

    /// Report this failure under the given catalog entry
    ///
    /// `data` is the fixed [`INVALID_ID_REASON`] text.
    pub fn to_error(&self, entry: ErrorCode) -> ErrorObject {
        ErrorObject::catalog(entry, Some(Value::String(INVALID_ID_REASON.to_string())))
    }
}

/// Validate a decoded id value
///
/// ```rust
/// use jrpc_core::{validate_id, Id};
/// use serde_json::json;
///
/// assert_eq!(validate_id(&json!("abc")), Ok(Id::from("abc")));
/// assert_eq!(validate_id(&json!(5.0)), Ok(Id::from(5)));
/// assert_eq!(validate_id(&json!(null)), Ok(Id::Null));
/// assert!(validate_id(&json!(true)).is_err());
/// assert!(validate_id(&json!(1.5)).is_err());
/// ```
pub fn validate_id(value: &Value) -> Result<Id, InvalidId> {
    match value {
        Value::Null => Ok(Id::Null),
        Value::String(s) => Ok(Id::String(s.clone())),
        Value::Number(n) => integral(n).map(Id::Number).ok_or(InvalidId {
            found: "fractional number",
        }),
        Value::Bool(_) => Err(InvalidId { found: "boolean" }),
        Value::Array(_) => Err(InvalidId { found: "array" }),
        Value::Object(_) => Err(InvalidId { found: "object" }),
    }
}

/// Canonical form of an integer-valued number, or `None` if it has a fraction
///
/// Integer-valued floats narrow to `i64`, then `u64`, when they fit.
fn integral(n: &Number) -> Option<Number> {
    if n.is_i64() || n.is_u64() {
        return Some(n.clone());
    }
    let f = n.as_f64()?;
    if f.fract() != 0.0 {
        return None;
    }
    // i64::MAX as f64 is 2^63 and u64::MAX as f64 is 2^64, both exclusive bounds
    if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(Number::from(f as i64))
    } else if f >= 0.0 && f < u64::MAX as f64 {
        Some(Number::from(f as u64))
    } else {
        Some(n.clone())
    }
}

impl TryFrom<Value> for Id {
    type Error = InvalidId;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validate_id(&value)
    }
}
