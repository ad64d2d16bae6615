//! # Gateway Runtime
//!
//! Process bootstrap for the tenant gateway.
//!
//! ## Modular Structure
//!
//! - `config` - `RuntimeConfig` loaded from the environment
//! - `logging` - global tracing subscriber (pretty or JSON)
//! - `runtime` - bus readiness, capabilities, HTTP serving, shutdown
//!
//! ```text
//!   HTTP ──→ api-gateway ──RPC──→ InMemoryMessageBus ──→ datacenter.* / service.*
//!                                                          (resource-store)
//! ```

pub mod config;
pub mod logging;
pub mod runtime;

pub use config::{BackoffConfig, RuntimeConfig};
pub use logging::init_tracing;
pub use runtime::GatewayRuntime;
