//! # Error Types
//!
//! Payload encoding errors shared by both sides of the bus.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a bus payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The value could not be serialized.
    #[error("payload encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The bytes are not a valid encoding of the expected type.
    #[error("payload decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
