//! JSON text encoding and decoding primitives
//!
//! This module is the seam between envelope logic and `serde_json`. It
//! provides:
//! - **Encoding**: any `Serialize` value to compact JSON text
//! - **Decoding**: text to a generic [`serde_json::Value`], with the decoder
//!   diagnostic preserved for Parse error reporting
//! - **Batch sniffing**: deciding whether text is array-shaped before decoding
//! - **Wire shape**: the member layout shared by every outbound message
//!
//! Failures are reported as [`Error`](crate::Error) and converted into
//! catalog [`ErrorObject`]s by the callers.

use crate::error::{Error, ErrorObject, Result};
use crate::types::{Id, JSONRPC_VERSION};
use serde::Serialize;
use serde_json::Value;

/// Encode any serializable value to compact JSON text
///
/// # Errors
///
/// Returns `Error::Serialization` if the value cannot be represented as JSON
/// (for example a map with non-string keys).
///
/// ```rust
/// use jrpc_core::codec;
///
/// let json = codec::encode(&vec![1, 2, 3]).unwrap();
/// assert_eq!(json, "[1,2,3]");
/// ```
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Convert any serializable value into a generic JSON value
pub fn to_value<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode JSON text into a generic value
///
/// # Errors
///
/// Returns `Error::Decode` carrying the decoder diagnostic when the text is
/// not valid JSON.
pub fn decode(data: &str) -> Result<Value> {
    serde_json::from_str(data).map_err(|e| Error::Decode(e.to_string()))
}

/// Check whether text is array-delimited once surrounding whitespace is trimmed
///
/// This only looks at the first and last characters. The content is not
/// validated, so `"[x:x]"` counts as batch-shaped and then fails to decode.
pub fn is_batch(data: &str) -> bool {
    let trimmed = data.trim();
    trimmed.starts_with('[') && trimmed.ends_with(']')
}

/// Outbound wire layout
///
/// Members are emitted in the order `jsonrpc, method, params, result, error,
/// id`. Absent members, null params and a null id are left out.
#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ErrorObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a Id>,
}

impl<'a> WireMessage<'a> {
    fn empty(id: &'a Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: None,
            params: None,
            result: None,
            error: None,
            id: id.as_option(),
        }
    }

    /// A request, or a notification when `id` is null
    pub(crate) fn call(method: &'a str, params: Option<&'a Value>, id: &'a Id) -> Self {
        Self {
            method: Some(method),
            params: params.filter(|p| !p.is_null()),
            ..Self::empty(id)
        }
    }

    pub(crate) fn success(result: &'a Value, id: &'a Id) -> Self {
        Self {
            result: Some(result),
            ..Self::empty(id)
        }
    }

    pub(crate) fn error(error: &'a ErrorObject, id: &'a Id) -> Self {
        Self {
            error: Some(error),
            ..Self::empty(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_valid() {
        let value = decode(r#"{"jsonrpc":"2.0","method":"test","id":1}"#).unwrap();
        assert_eq!(value["method"], "test");
    }

    #[test]
    fn test_decode_invalid_keeps_diagnostic() {
        match decode("not valid json") {
            Err(Error::Decode(msg)) => assert!(!msg.is_empty()),
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_maps_to_parse_error() {
        let err: ErrorObject = decode("{").unwrap_err().into();
        assert_eq!(err.code, -32700);
        assert!(err.data.is_some());
    }

    #[test]
    fn test_is_batch() {
        assert!(is_batch("[]"));
        assert!(is_batch("  [1, 2]\n"));
        assert!(is_batch("[x:x]"));
        assert!(!is_batch(r#"{"a":[1]}"#));
        assert!(!is_batch("[1, 2"));
        assert!(!is_batch(""));
    }

    #[test]
    fn test_encode_non_string_keys_fails() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1);
        assert!(matches!(encode(&map), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_wire_member_order() {
        let params = json!({"a": 1});
        let id = Id::from(1);
        let text = encode(&WireMessage::call("m", Some(&params), &id)).unwrap();
        assert_eq!(text, r#"{"jsonrpc":"2.0","method":"m","params":{"a":1},"id":1}"#);
    }

    #[test]
    fn test_wire_omits_null_params_and_id() {
        let params = Value::Null;
        let text = encode(&WireMessage::call("m", Some(&params), &Id::Null)).unwrap();
        assert_eq!(text, r#"{"jsonrpc":"2.0","method":"m"}"#);
    }
}
