//! Reply addresses for request/reply correlation.
//!
//! Uses UUID v7 for time-ordered, unique identifiers.

use std::fmt;
use uuid::Uuid;

/// Prefix shared by every reply subject.
pub const REPLY_PREFIX: &str = "_INBOX.";

/// A reply subject owned by exactly one in-flight call.
///
/// The address is the correlation key: one call listens on it, one
/// responder publishes to it, nobody else does either.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReplyAddress(String);

impl ReplyAddress {
    /// Generate a fresh reply address.
    pub fn new() -> Self {
        Self(format!("{}{}", REPLY_PREFIX, Uuid::now_v7().simple()))
    }

    /// Get the subject string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Correlation id portion (without the prefix), for logging.
    pub fn correlation_id(&self) -> &str {
        self.0.strip_prefix(REPLY_PREFIX).unwrap_or(&self.0)
    }

    /// Whether a subject is a reply address.
    pub fn is_reply_subject(subject: &str) -> bool {
        subject.starts_with(REPLY_PREFIX)
    }
}

impl Default for ReplyAddress {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReplyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReplyAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
