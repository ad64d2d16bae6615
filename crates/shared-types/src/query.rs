//! # Bus Payloads
//!
//! Request and reply bodies for the capability subjects.
//!
//! | Subject | Request | Reply |
//! |---|---|---|
//! | `<kind>.get`  | [`EntityQuery`]  | entity, or [`ErrorReply`] `{"error":"not found"}` |
//! | `<kind>.find` | `{}`             | array of every stored entity |
//! | `<kind>.set`  | entity           | entity with server-assigned `id` |
//! | `<kind>.del`  | [`DeleteRequest`]| empty payload |

use crate::entities::{EntityId, GroupId, UNASSIGNED_GROUP};
use crate::errors::PayloadError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Message carried by the not-found sentinel.
pub const NOT_FOUND: &str = "not found";

fn is_unassigned(group_id: &GroupId) -> bool {
    *group_id == UNASSIGNED_GROUP
}

/// Lookup of a single entity.
///
/// A zero `group_id` matches across all tenants (admin context). When `name`
/// is set the lookup is by name instead of by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EntityQuery {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub group_id: GroupId,
}

impl EntityQuery {
    pub fn by_id(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Restrict the lookup to one tenant.
    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.group_id = group_id;
        self
    }
}

/// Explicit error reply. Sent instead of an empty reply so callers never
/// depend on their timeout for an ordinary miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

impl ErrorReply {
    pub fn not_found() -> Self {
        Self {
            error: NOT_FOUND.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.error == NOT_FOUND
    }
}

/// Reply to a `get`, `find` or `set`: either an error object or the value.
///
/// The error variant is tried first; entity types default every field and
/// would otherwise swallow `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply<T> {
    Error(ErrorReply),
    Value(T),
}

impl<T> Reply<T> {
    /// The value, treating any error reply as absent.
    pub fn into_option(self) -> Option<T> {
        match self {
            Reply::Value(value) => Some(value),
            Reply::Error(_) => None,
        }
    }

    /// Distinguish a plain miss from a backend failure.
    ///
    /// `Ok(None)` for the not-found sentinel, `Err` for any other error reply.
    pub fn into_result(self) -> Result<Option<T>, ErrorReply> {
        match self {
            Reply::Value(value) => Ok(Some(value)),
            Reply::Error(e) if e.is_not_found() => Ok(None),
            Reply::Error(e) => Err(e),
        }
    }
}

/// Target of a `del`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeleteRequest {
    #[serde(default)]
    pub id: EntityId,
}

/// Encode a payload as JSON bytes.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, PayloadError> {
    serde_json::to_vec(value).map_err(PayloadError::Encode)
}

/// Strictly decode a JSON payload.
pub fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, PayloadError> {
    serde_json::from_slice(payload).map_err(PayloadError::Decode)
}

/// Decode a JSON payload, falling back to `T::default()` when the payload is
/// empty or malformed.
pub fn decode_or_default<T: DeserializeOwned + Default>(payload: &[u8]) -> T {
    if payload.is_empty() {
        return T::default();
    }
    serde_json::from_slice(payload).unwrap_or_default()
}
