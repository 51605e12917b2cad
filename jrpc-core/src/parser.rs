//! Classification of inbound JSON-RPC 2.0 text
//!
//! [`parse`] sniffs whether the trimmed text is array-delimited and
//! dispatches to the single-message or batch path. Every message then runs
//! through the same checks, each of which short-circuits into an
//! [`Envelope::Invalid`]:
//!
//! 1. Blank input: Invalid Request (`"empty message"`)
//! 2. Undecodable JSON: Parse error, with the decoder diagnostic as `data`
//! 3. `jsonrpc` not exactly `"2.0"`: Invalid Request (`"invalid jsonrpc version"`)
//! 4. Illegal id: Invalid Request (the invalid-id reason)
//! 5. Variant discrimination, in order:
//!    - non-empty `method`: Request if the id is non-null, else Notification
//!    - non-null `error`: Error reply
//!    - non-null `result`: Success reply
//!    - otherwise: Invalid Request (`"invalid jsonrpc object"`)
//!
//! In a batch, steps 3 to 5 run independently for every element. Only a
//! failure to decode the outer array collapses the whole batch into a
//! single Parse error element.
//!
//! An explicit `"result": null` is treated the same as a missing result.
//!
//! # Examples
//!
//! ```rust
//! use jrpc_core::{parse, Kind, Parsed};
//!
//! let parsed = parse(r#"[{"jsonrpc":"2.0","method":"a","id":1},{"foo":"boo"}]"#);
//! let kinds: Vec<Kind> = parsed.into_vec().iter().map(|e| e.kind()).collect();
//! assert_eq!(kinds, vec![Kind::Request, Kind::Invalid]);
//! ```

use crate::codec;
use crate::error::{ErrorCode, ErrorObject};
use crate::id::validate_id;
use crate::types::{
    Envelope, ErrorReply, Id, Notification, Request, Success, JSONRPC_VERSION,
};
use serde_json::{Map, Value};

/// Blank input
pub const EMPTY_MESSAGE: &str = "empty message";
/// `jsonrpc` member missing or not `"2.0"`
pub const INVALID_VERSION: &str = "invalid jsonrpc version";
/// Neither a call nor a reply
pub const INVALID_OBJECT: &str = "invalid jsonrpc object";
/// Decoded value is not a JSON object
pub const NOT_AN_OBJECT: &str = "invalid jsonrpc message structures";
/// `method` present but not a string
pub const INVALID_METHOD: &str = "method MUST be a String";
/// `error` present but not a valid error object
pub const INVALID_ERROR_OBJECT: &str = "invalid error object";
/// Batch array with no elements
pub const EMPTY_BATCH: &str = "empty batch";
/// Batch parsing asked for, but the text is not an array
pub const NOT_A_BATCH: &str = "batch MUST be an Array";
/// A reply arrived where a call was expected
pub const EXPECTED_CALL: &str = "expected a request or notification";
/// A call arrived where a reply was expected
pub const EXPECTED_REPLY: &str = "expected a success or error reply";

/// Outcome of [`parse`]: one envelope, or a batch of them
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Single(Envelope),
    Batch(Vec<Envelope>),
}

impl Parsed {
    pub fn is_batch(&self) -> bool {
        matches!(self, Parsed::Batch(_))
    }

    /// The single envelope, or `None` for a batch
    pub fn single(self) -> Option<Envelope> {
        match self {
            Parsed::Single(env) => Some(env),
            Parsed::Batch(_) => None,
        }
    }

    /// Flatten into a sequence (a single message becomes a one-element vector)
    pub fn into_vec(self) -> Vec<Envelope> {
        match self {
            Parsed::Single(env) => vec![env],
            Parsed::Batch(items) => items,
        }
    }

    fn map(self, f: impl Fn(Envelope) -> Envelope) -> Self {
        match self {
            Parsed::Single(env) => Parsed::Single(f(env)),
            Parsed::Batch(items) => Parsed::Batch(items.into_iter().map(f).collect()),
        }
    }
}

fn invalid(entry: ErrorCode, reason: impl Into<String>, id: Id) -> Envelope {
    let reason = reason.into();
    tracing::debug!(code = entry.code(), reason = %reason, id = %id, "message classified as invalid");
    Envelope::invalid(ErrorObject::catalog(entry, Some(Value::String(reason))), id)
}

/// Parse text as either a single message or a batch
///
/// The form is chosen by [`codec::is_batch`]: text whose trimmed form starts
/// with `[` and ends with `]` is parsed with [`parse_batch`], anything else
/// with [`parse_message`].
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn parse(text: &str) -> Parsed {
    if codec::is_batch(text) {
        Parsed::Batch(parse_batch(text))
    } else {
        Parsed::Single(parse_message(text))
    }
}

/// Parse text as a single message
///
/// ```rust
/// use jrpc_core::{parse_message, Id, Kind};
///
/// let env = parse_message(r#"{"jsonrpc":"2.0","result":"OK","id":"123"}"#);
/// assert_eq!(env.kind(), Kind::Success);
/// assert_eq!(env.id(), Some(&Id::from("123")));
/// ```
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn parse_message(text: &str) -> Envelope {
    if text.trim().is_empty() {
        return invalid(ErrorCode::InvalidRequest, EMPTY_MESSAGE, Id::Null);
    }
    match codec::decode(text) {
        Ok(value) => classify(value),
        Err(e) => {
            tracing::debug!(error = %e, "message failed to decode");
            Envelope::invalid(e.into(), Id::Null)
        }
    }
}

/// Parse text as a batch
///
/// Always returns at least one element. Decoding the outer array is all or
/// nothing: if it fails, the result is a single Parse error element. Once it
/// succeeds, each element is classified on its own and a bad element never
/// affects its siblings.
///
/// An empty array, or valid JSON that is not an array, yields a single
/// Invalid Request element.
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn parse_batch(text: &str) -> Vec<Envelope> {
    if text.trim().is_empty() {
        return vec![invalid(ErrorCode::InvalidRequest, EMPTY_MESSAGE, Id::Null)];
    }
    let value = match codec::decode(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "batch failed to decode");
            return vec![Envelope::invalid(e.into(), Id::Null)];
        }
    };
    match value {
        Value::Array(items) if items.is_empty() => {
            vec![invalid(ErrorCode::InvalidRequest, EMPTY_BATCH, Id::Null)]
        }
        Value::Array(items) => {
            tracing::trace!(batch_size = items.len(), "classifying batch");
            items.into_iter().map(classify).collect()
        }
        _ => vec![invalid(ErrorCode::InvalidRequest, NOT_A_BATCH, Id::Null)],
    }
}

/// Parse text where only requests and notifications are acceptable
///
/// Replies are reported as Invalid Request, keeping their id.
pub fn parse_request(text: &str) -> Parsed {
    parse(text).map(expect_call)
}

/// Parse text where only success and error replies are acceptable
///
/// Requests and notifications are reported as Invalid Request.
pub fn parse_reply(text: &str) -> Parsed {
    parse(text).map(expect_reply)
}

fn expect_call(env: Envelope) -> Envelope {
    match env {
        Envelope::Success(Success { id, .. }) | Envelope::Error(ErrorReply { id, .. }) => {
            invalid(ErrorCode::InvalidRequest, EXPECTED_CALL, id)
        }
        other => other,
    }
}

fn expect_reply(env: Envelope) -> Envelope {
    match env {
        Envelope::Request(Request { id, .. }) => {
            invalid(ErrorCode::InvalidRequest, EXPECTED_REPLY, id)
        }
        Envelope::Notification(_) => invalid(ErrorCode::InvalidRequest, EXPECTED_REPLY, Id::Null),
        other => other,
    }
}

/// Classify one decoded JSON value
///
/// This is the per-message half of [`parse_message`] and the per-element
/// step of [`parse_batch`], exposed for callers that already hold a decoded
/// value.
pub fn classify(value: Value) -> Envelope {
    let mut obj = match value {
        Value::Object(obj) => obj,
        _ => return invalid(ErrorCode::InvalidRequest, NOT_AN_OBJECT, Id::Null),
    };

    if obj.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return invalid(ErrorCode::InvalidRequest, INVALID_VERSION, recover_id(&obj));
    }

    let id = match obj.get("id").map(validate_id).transpose() {
        Ok(id) => id.unwrap_or_default(),
        Err(e) => {
            tracing::debug!(found = e.found(), "rejected message id");
            return Envelope::invalid(e.to_error(ErrorCode::InvalidRequest), Id::Null);
        }
    };

    let env = match discriminate(&mut obj, id) {
        Ok(env) => env,
        Err((reason, id)) => return invalid(ErrorCode::InvalidRequest, reason, id),
    };
    tracing::trace!(kind = %env.kind(), "message classified");
    env
}

/// Best-effort id for an invalid message
fn recover_id(obj: &Map<String, Value>) -> Id {
    obj.get("id")
        .and_then(|v| validate_id(v).ok())
        .unwrap_or_default()
}

fn discriminate(obj: &mut Map<String, Value>, id: Id) -> Result<Envelope, (String, Id)> {
    match obj.remove("method") {
        Some(Value::String(method)) if !method.is_empty() => {
            let params = obj.remove("params").filter(|p| !p.is_null());
            return Ok(if id.is_null() {
                Envelope::Notification(Notification { method, params })
            } else {
                Envelope::Request(Request { id, method, params })
            });
        }
        // An empty or null method does not make a call; fall through to the reply checks
        Some(Value::String(_)) | Some(Value::Null) | None => {}
        Some(_) => return Err((INVALID_METHOD.to_string(), id)),
    }

    match obj.remove("error") {
        Some(Value::Null) | None => {}
        Some(raw) => {
            return match serde_json::from_value::<ErrorObject>(raw) {
                Ok(error) => Ok(Envelope::Error(ErrorReply { id, error })),
                Err(e) => Err((format!("{}: {}", INVALID_ERROR_OBJECT, e), id)),
            };
        }
    }

    match obj.remove("result") {
        Some(Value::Null) | None => Err((INVALID_OBJECT.to_string(), id)),
        Some(result) => Ok(Envelope::Success(Success { id, result })),
    }
}
