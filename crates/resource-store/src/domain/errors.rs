//! # Domain Errors
//!
//! Failures surfaced by an [`EntityStore`](crate::EntityStore).

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An update targeted an id the store does not hold.
    #[error("{kind} {id} does not exist")]
    UnknownId { kind: &'static str, id: String },

    /// The backing engine failed.
    #[error("store backend failure: {0}")]
    Backend(String),
}
