//! Bus message envelope.

use bytes::Bytes;

/// A message as delivered to a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusMessage {
    /// Subject the message was published on.
    pub subject: String,
    /// Where the responder should publish its reply, if anywhere.
    pub reply: Option<String>,
    /// Opaque payload (JSON for capability traffic).
    pub payload: Bytes,
}

impl BusMessage {
    pub fn new(subject: impl Into<String>, reply: Option<String>, payload: Bytes) -> Self {
        Self {
            subject: subject.into(),
            reply,
            payload,
        }
    }
}
