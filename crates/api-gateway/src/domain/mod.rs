//! Domain types for the API Gateway.
//!
//! Authorization, validation, projection, configuration and the error
//! taxonomy. Nothing here performs I/O.

pub mod authz;
pub mod config;
pub mod error;
pub mod projection;
pub mod validation;

// Re-exports for convenience
pub use config::{ConfigError, GatewayConfig};
pub use error::{ErrorBody, GatewayError, GatewayResult};
pub use projection::{Enricher, NoEnrichment, Projector, Redact};
