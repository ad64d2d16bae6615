//! # Resource Store
//!
//! Backend capability for tenant-owned entities. Each entity kind is served
//! on four durable subjects:
//!
//! ```text
//!                    ┌──────────────────────────────┐
//! <kind>.get  ─────→ │                              │
//! <kind>.find ─────→ │  CapabilityService<E, S>     │ ──→ EntityStore<E>
//! <kind>.set  ─────→ │  (one task per subject)      │
//! <kind>.del  ─────→ │                              │
//!                    └──────────────────────────────┘
//!                                  │
//!                                  └──→ reply address of each request
//! ```
//!
//! ## Boundaries
//!
//! | Concern | Owner |
//! |---|---|
//! | Tenant filtering of `find` | gateway (this crate returns everything) |
//! | Name uniqueness on `set` | gateway |
//! | Group stamping on create | gateway |
//! | Referential integrity on `del` | gateway |
//!
//! Every request gets exactly one reply. Malformed input is treated as an
//! empty query, and a miss answers with the not-found sentinel.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Query matching and errors
//! - `ports/` - Outbound store trait
//! - `adapters/` - In-memory store
//! - `service/` - Transport-free capability handlers
//! - `bus/` - Subscription loops that feed the handlers

pub mod adapters;
pub mod bus;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::memory::InMemoryStore;
pub use bus::{CapabilityService, RunningCapability};
pub use domain::errors::StoreError;
pub use domain::matching::matches_query;
pub use ports::outbound::EntityStore;
pub use service::CapabilityHandler;
