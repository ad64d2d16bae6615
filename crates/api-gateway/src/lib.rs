//! # API Gateway
//!
//! Tenant-scoped HTTP surface for datacenters and services. Every lookup or
//! mutation is delegated to a [`ResourceBackend`]; in production that is a
//! [`BusBackend`] talking to capabilities over request/reply RPC.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        API GATEWAY                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │   HTTP (axum)   Cors → Tracing → Auth (JWT → AuthenticatedUser)│
//! │        │                                                     │
//! │  ┌─────┴──────────────────────────────────────────────┐      │
//! │  │ Handlers: validate → authorize → backend → project │      │
//! │  └─────┬──────────────────────────────────────────────┘      │
//! │        │  ResourceBackend<E>                                 │
//! │  ┌─────┴──────────┐        ┌──────────────────┐              │
//! │  │  BusBackend    │        │  StoreBackend    │              │
//! │  │  (RpcClient)   │        │  (in-process)    │              │
//! │  └─────┬──────────┘        └──────────────────┘              │
//! └────────┼─────────────────────────────────────────────────────┘
//!          │  <kind>.get / .find / .set / .del
//!          ▼
//!   resource-store capabilities
//! ```
//!
//! # Tenant rules
//!
//! - Admins read every tenant; members read only their own group.
//! - Writes require the caller to own the entity unless they are an admin.
//! - Cross-tenant single reads answer 404, never 403.
//! - Lists are always redacted.
//!
//! # Usage
//!
//! ```ignore
//! use api_gateway::{GatewayConfig, GatewayService};
//!
//! let config = GatewayConfig::default().with_jwt_secret(secret);
//! let gateway = GatewayService::from_bus(config, bus)?;
//! gateway.serve(shutdown_signal()).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod router;
pub mod service;

pub use adapters::{BusBackend, StoreBackend};
pub use domain::{ConfigError, GatewayConfig, GatewayError, GatewayResult};
pub use handlers::{DatacenterHandlers, ServiceHandlers};
pub use middleware::Claims;
pub use ports::ResourceBackend;
pub use router::{build_router, AppState};
pub use service::{GatewayService, ServerError};
