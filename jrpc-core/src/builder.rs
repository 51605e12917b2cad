//! Constructors for outbound JSON-RPC 2.0 messages
//!
//! Every constructor returns the encoded text, or the [`ErrorObject`]
//! describing why it could not be built. Failures are Internal errors
//! (-32603) with a reason in `data`:
//! - an id outside the legal domain (string, integer, null)
//! - a missing or null result on a success reply
//! - a value that cannot be encoded as JSON
//!
//! Ids are accepted as any `Serialize` value so that an illegal id is caught
//! here rather than by the receiver. A null id (or `Id::Null`) leaves the
//! `id` member out of the message.
//!
//! # Examples
//!
//! ```rust
//! use jrpc_core::{build_batch, build_notification, build_request};
//!
//! let req = build_request(123, "update", None).unwrap();
//! assert_eq!(req, r#"{"jsonrpc":"2.0","method":"update","id":123}"#);
//!
//! let notif = build_notification("update", Some(serde_json::json!(0))).unwrap();
//! assert_eq!(notif, r#"{"jsonrpc":"2.0","method":"update","params":0}"#);
//!
//! let batch = build_batch(&[req, notif]);
//! assert!(batch.starts_with("[{") && batch.ends_with("}]"));
//!
//! assert!(build_request(true, "update", None).is_err());
//! ```

use crate::codec::{self, WireMessage};
use crate::error::{ErrorCode, ErrorObject};
use crate::id::validate_id;
use crate::idgen;
use crate::types::Id;
use serde::Serialize;
use serde_json::Value;

/// Reason given when a success reply has no result
pub const MISSING_RESULT: &str = "result is required";

fn reject(reason: impl Into<Value>) -> ErrorObject {
    let err = ErrorObject::internal_error(Some(reason.into()));
    tracing::warn!(error = %err, data = ?err.data, "message construction rejected");
    err
}

/// Convert and validate an outbound id
fn outbound_id<I: Serialize>(id: I) -> Result<Id, ErrorObject> {
    let value = codec::to_value(id).map_err(ErrorObject::from)?;
    validate_id(&value).map_err(|e| {
        tracing::warn!(found = e.found(), "rejected outbound id");
        e.to_error(ErrorCode::InternalError)
    })
}

fn encode(wire: &WireMessage<'_>) -> Result<String, ErrorObject> {
    codec::encode(wire).map_err(|e| reject(e.to_string()))
}

/// Build a request, or a notification when `id` is null
///
/// `params` of `None` or JSON null leave the `params` member out.
///
/// ```rust
/// use jrpc_core::build_request;
///
/// let text = build_request("123", "update", None).unwrap();
/// assert_eq!(text, r#"{"jsonrpc":"2.0","method":"update","id":"123"}"#);
///
/// let err = build_request(1.5, "update", None).unwrap_err();
/// assert_eq!(err.code, -32603);
/// ```
#[tracing::instrument(skip_all, fields(method = %method))]
pub fn build_request<I: Serialize>(
    id: I,
    method: &str,
    params: Option<Value>,
) -> Result<String, ErrorObject> {
    let id = outbound_id(id)?;
    encode(&WireMessage::call(method, params.as_ref(), &id))
}

/// Build a notification (a request without an id)
pub fn build_notification(method: &str, params: Option<Value>) -> Result<String, ErrorObject> {
    build_request(Id::Null, method, params)
}

/// Build a request with a freshly generated random id
///
/// Returns the id alongside the text so the caller can match the reply.
pub fn build_request_auto(
    method: &str,
    params: Option<Value>,
) -> Result<(Id, String), ErrorObject> {
    let id = idgen::rand_request_id();
    let text = build_request(&id, method, params)?;
    Ok((id, text))
}

/// Build a success reply
///
/// The result is mandatory: a result that encodes to JSON null is rejected.
///
/// ```rust
/// use jrpc_core::build_success;
///
/// let text = build_success(123, Vec::<String>::new()).unwrap();
/// assert_eq!(text, r#"{"jsonrpc":"2.0","result":[],"id":123}"#);
///
/// assert!(build_success("123", ()).is_err());
/// ```
#[tracing::instrument(skip_all)]
pub fn build_success<I: Serialize, R: Serialize>(id: I, result: R) -> Result<String, ErrorObject> {
    let result = codec::to_value(result).map_err(ErrorObject::from)?;
    if result.is_null() {
        return Err(reject(MISSING_RESULT));
    }
    let id = outbound_id(id)?;
    encode(&WireMessage::success(&result, &id))
}

/// Build an error reply embedding `error` verbatim
///
/// ```rust
/// use jrpc_core::{build_error, error_with, Id};
///
/// let text = build_error(Id::Null, &error_with(1, "test", None)).unwrap();
/// assert_eq!(text, r#"{"jsonrpc":"2.0","error":{"code":1,"message":"test"}}"#);
/// ```
#[tracing::instrument(skip_all, fields(code = error.code))]
pub fn build_error<I: Serialize>(id: I, error: &ErrorObject) -> Result<String, ErrorObject> {
    let id = outbound_id(id)?;
    encode(&WireMessage::error(error, &id))
}

/// Join already-encoded messages into a batch array
///
/// This is plain text concatenation; the fragments are not re-validated.
/// No fragments yields `"[]"`.
///
/// ```rust
/// use jrpc_core::build_batch;
///
/// assert_eq!(build_batch::<&str>(&[]), "[]");
/// assert_eq!(build_batch(&["{\"a\":1}", "{\"b\":2}"]), "[{\"a\":1},{\"b\":2}]");
/// ```
#[tracing::instrument(skip_all, fields(count = fragments.len()))]
pub fn build_batch<S: AsRef<str>>(fragments: &[S]) -> String {
    let body: Vec<&str> = fragments.iter().map(AsRef::as_ref).collect();
    format!("[{}]", body.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::INVALID_ID_REASON;
    use crate::parser::parse_message;
    use crate::types::Kind;
    use serde_json::json;

    #[test]
    fn test_request_shapes() {
        assert_eq!(
            build_request(123, "update", None).unwrap(),
            r#"{"jsonrpc":"2.0","method":"update","id":123}"#
        );
        assert_eq!(
            build_request("123", "update", None).unwrap(),
            r#"{"jsonrpc":"2.0","method":"update","id":"123"}"#
        );
        assert_eq!(
            build_request(Id::from(5), "sum", Some(json!([1, 2]))).unwrap(),
            r#"{"jsonrpc":"2.0","method":"sum","params":[1,2],"id":5}"#
        );
    }

    #[test]
    fn test_request_with_illegal_id() {
        for err in [
            build_request(true, "update", None).unwrap_err(),
            build_request(1.5, "update", None).unwrap_err(),
            build_request(json!({"a": 1}), "update", None).unwrap_err(),
            build_request(vec![1], "update", None).unwrap_err(),
        ] {
            assert!(err.is(ErrorCode::InternalError));
            assert_eq!(err.data, Some(json!(INVALID_ID_REASON)));
        }
    }

    #[test]
    fn test_null_id_builds_notification() {
        let text = build_request(Option::<i64>::None, "update", None).unwrap();
        assert_eq!(text, r#"{"jsonrpc":"2.0","method":"update"}"#);
    }

    #[test]
    fn test_notification() {
        assert_eq!(
            build_notification("update", None).unwrap(),
            r#"{"jsonrpc":"2.0","method":"update"}"#
        );
        assert_eq!(
            build_notification("update", Some(json!(0))).unwrap(),
            r#"{"jsonrpc":"2.0","method":"update","params":0}"#
        );
        assert_eq!(
            build_notification("update", Some(Value::Null)).unwrap(),
            r#"{"jsonrpc":"2.0","method":"update"}"#
        );
    }

    #[test]
    fn test_success() {
        assert_eq!(
            build_success("123", "OK").unwrap(),
            r#"{"jsonrpc":"2.0","result":"OK","id":"123"}"#
        );
        assert_eq!(
            build_success(123, Vec::<String>::new()).unwrap(),
            r#"{"jsonrpc":"2.0","result":[],"id":123}"#
        );
    }

    #[test]
    fn test_success_requires_result() {
        let err = build_success("123", Value::Null).unwrap_err();
        assert!(err.is(ErrorCode::InternalError));
        assert_eq!(err.data, Some(json!(MISSING_RESULT)));

        let err = build_success("123", Option::<String>::None).unwrap_err();
        assert!(err.is(ErrorCode::InternalError));
    }

    #[test]
    fn test_success_with_illegal_id() {
        let err = build_success(true, "").unwrap_err();
        assert_eq!(err.data, Some(json!(INVALID_ID_REASON)));
    }

    #[test]
    fn test_error_reply() {
        let rpcerr = crate::error::error_with(1, "test", None);
        assert_eq!(
            build_error(Id::Null, &rpcerr).unwrap(),
            r#"{"jsonrpc":"2.0","error":{"code":1,"message":"test"}}"#
        );

        let rpcerr = crate::error::error_with(1, "test", Some(json!("xx")));
        assert_eq!(
            build_error(Id::Null, &rpcerr).unwrap(),
            r#"{"jsonrpc":"2.0","error":{"code":1,"message":"test","data":"xx"}}"#
        );

        let err = build_error(true, &rpcerr).unwrap_err();
        assert!(err.is(ErrorCode::InternalError));
    }

    #[test]
    fn test_batch() {
        let first = build_request(123, "update", None).unwrap();
        let second = build_request("123", "update", None).unwrap();
        assert_eq!(
            build_batch(&[first, second]),
            r#"[{"jsonrpc":"2.0","method":"update","id":123},{"jsonrpc":"2.0","method":"update","id":"123"}]"#
        );
        assert_eq!(build_batch::<String>(&[]), "[]");
    }

    #[test]
    fn test_auto_id_request() {
        let (id, text) = build_request_auto("ping", None).unwrap();
        let env = parse_message(&text);
        assert_eq!(env.kind(), Kind::Request);
        assert_eq!(env.id(), Some(&id));
    }

    #[test]
    fn test_unencodable_result() {
        let mut map = std::collections::HashMap::new();
        map.insert((1, 2), "x");
        let err = build_success(1, map).unwrap_err();
        assert!(err.is(ErrorCode::InternalError));
    }
}
