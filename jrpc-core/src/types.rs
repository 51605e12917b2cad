//! JSON-RPC 2.0 envelope model
//!
//! An inbound message is classified into exactly one [`Envelope`] variant.
//! Each variant carries only the members that are legal for it, so a
//! request has no `result` and a success reply has no `method`:
//!
//! | Variant        | Carries                      |
//! |----------------|------------------------------|
//! | `Request`      | non-null id, method, params  |
//! | `Notification` | method, params               |
//! | `Success`      | id, result                   |
//! | `Error`        | id, error object             |
//! | `Invalid`      | recovered id, error object   |
//!
//! The protocol version is not stored: every valid variant is, by
//! construction, a `"2.0"` message.

use crate::codec::{self, WireMessage};
use crate::error::ErrorObject;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// The only protocol generation accepted by the classifier
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 message id
///
/// The legal id domain is a string, an integer-valued number, or null.
/// Fractional numbers, booleans, arrays and objects are rejected by
/// [`validate_id`](crate::validate_id), which also backs `Deserialize`.
///
/// `Null` stands for both "id member absent" and "id member is null"; the
/// constructors omit the member entirely in that case.
///
/// ```rust
/// use jrpc_core::Id;
///
/// let id: Id = "req-1".into();
/// assert_eq!(id.to_string(), "\"req-1\"");
/// assert_eq!(Id::from(42).to_string(), "42");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier
    String(String),
    /// Integer-valued identifier, kept as `i64` or `u64` whenever it fits
    Number(Number),
    /// No identifier
    #[default]
    Null,
}

impl Id {
    /// Returns true for [`Id::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Id::Null)
    }

    /// `None` for [`Id::Null`], otherwise the id itself
    pub fn as_option(&self) -> Option<&Id> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Id::try_from(value).map_err(de::Error::custom)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n.into())
    }
}

impl From<i32> for Id {
    fn from(n: i32) -> Self {
        Id::Number(n.into())
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        Id::Number(n.into())
    }
}

impl From<Id> for Value {
    fn from(id: Id) -> Self {
        match id {
            Id::String(s) => Value::String(s),
            Id::Number(n) => Value::Number(n),
            Id::Null => Value::Null,
        }
    }
}

/// Classification tag of an envelope
///
/// Derived from the variant, never set by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Request,
    Notification,
    Success,
    Error,
    Invalid,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Request => "request",
            Kind::Notification => "notification",
            Kind::Success => "success",
            Kind::Error => "error",
            Kind::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A call that expects a reply
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Never [`Id::Null`]
    pub id: Id,
    pub method: String,
    pub params: Option<Value>,
}

/// A call without an id; no reply is expected
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub method: String,
    pub params: Option<Value>,
}

/// A successful reply
#[derive(Debug, Clone, PartialEq)]
pub struct Success {
    pub id: Id,
    /// Never JSON null
    pub result: Value,
}

/// An error reply
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReply {
    pub id: Id,
    pub error: ErrorObject,
}

/// A message that failed classification
///
/// `error` is the catalog entry explaining why, with a short reason in
/// `data`. `id` is whatever legal id could be recovered from the message,
/// so a server can still address its error reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Invalid {
    pub id: Id,
    pub error: ErrorObject,
}

/// A classified JSON-RPC 2.0 message
///
/// # Examples
///
/// ```rust
/// use jrpc_core::{parse_message, Envelope, Kind};
///
/// let env = parse_message(r#"{"jsonrpc":"2.0","method":"update","id":123}"#);
/// assert_eq!(env.kind(), Kind::Request);
///
/// match env {
///     Envelope::Request(req) => assert_eq!(req.method, "update"),
///     other => panic!("unexpected {}", other.kind()),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Request(Request),
    Notification(Notification),
    Success(Success),
    Error(ErrorReply),
    Invalid(Invalid),
}

impl Envelope {
    pub(crate) fn invalid(error: ErrorObject, id: Id) -> Self {
        Envelope::Invalid(Invalid { id, error })
    }

    /// The classification tag of this envelope
    pub fn kind(&self) -> Kind {
        match self {
            Envelope::Request(_) => Kind::Request,
            Envelope::Notification(_) => Kind::Notification,
            Envelope::Success(_) => Kind::Success,
            Envelope::Error(_) => Kind::Error,
            Envelope::Invalid(_) => Kind::Invalid,
        }
    }

    /// Returns false only for [`Envelope::Invalid`]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Envelope::Invalid(_))
    }

    /// Request or notification
    pub fn is_call(&self) -> bool {
        matches!(self, Envelope::Request(_) | Envelope::Notification(_))
    }

    /// Success or error reply
    pub fn is_reply(&self) -> bool {
        matches!(self, Envelope::Success(_) | Envelope::Error(_))
    }

    /// The message id
    ///
    /// `None` for notifications. Replies and invalid messages may carry
    /// [`Id::Null`].
    pub fn id(&self) -> Option<&Id> {
        match self {
            Envelope::Request(req) => Some(&req.id),
            Envelope::Notification(_) => None,
            Envelope::Success(ok) => Some(&ok.id),
            Envelope::Error(reply) => Some(&reply.id),
            Envelope::Invalid(inv) => Some(&inv.id),
        }
    }

    pub fn method(&self) -> Option<&str> {
        match self {
            Envelope::Request(req) => Some(&req.method),
            Envelope::Notification(notif) => Some(&notif.method),
            _ => None,
        }
    }

    pub fn params(&self) -> Option<&Value> {
        match self {
            Envelope::Request(req) => req.params.as_ref(),
            Envelope::Notification(notif) => notif.params.as_ref(),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match self {
            Envelope::Success(ok) => Some(&ok.result),
            _ => None,
        }
    }

    /// The error object of an error reply, or the reason an envelope is invalid
    pub fn error(&self) -> Option<&ErrorObject> {
        match self {
            Envelope::Error(reply) => Some(&reply.error),
            Envelope::Invalid(inv) => Some(&inv.error),
            _ => None,
        }
    }

    /// Encode this envelope back to wire text
    ///
    /// An [`Envelope::Invalid`] encodes as the error reply that answers it:
    /// its error object, addressed to the recovered id.
    pub fn to_json(&self) -> Result<String, ErrorObject> {
        let no_id = Id::Null;
        let wire = match self {
            Envelope::Request(req) => WireMessage::call(&req.method, req.params.as_ref(), &req.id),
            Envelope::Notification(notif) => {
                WireMessage::call(&notif.method, notif.params.as_ref(), &no_id)
            }
            Envelope::Success(ok) => WireMessage::success(&ok.result, &ok.id),
            Envelope::Error(reply) => WireMessage::error(&reply.error, &reply.id),
            Envelope::Invalid(inv) => WireMessage::error(&inv.error, &inv.id),
        };
        codec::encode(&wire).map_err(ErrorObject::from)
    }
}
