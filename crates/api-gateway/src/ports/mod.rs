//! Port definitions.

pub mod outbound;

pub use outbound::ResourceBackend;
