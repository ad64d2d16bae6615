//! Middleware stack for the gateway.
//!
//! Layer order: Request → Cors → Tracing → Auth → Handler
//!
//! `/health` sits outside the auth layer.

pub mod auth;
pub mod cors;
pub mod tracing;

pub use auth::{AuthError, AuthLayer, Claims, TokenDecoder};
pub use cors::create_cors_layer;
pub use tracing::TracingLayer;
