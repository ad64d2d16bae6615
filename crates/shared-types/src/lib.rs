//! # Shared Types Crate
//!
//! Entities, identities and bus payloads shared between the HTTP gateway and
//! the backend capabilities.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses the bus is defined here.
//! - **Tenant Ownership**: every resource carries the `GroupId` of the tenant
//!   that owns it. `0` means "unassigned".
//! - **Transport Agnostic**: nothing here knows how bytes move; payloads are
//!   plain serde types encoded as JSON.

pub mod entities;
pub mod errors;
pub mod query;
pub mod subjects;

pub use entities::*;
pub use errors::*;
pub use query::*;
pub use subjects::{Operation, Subjects};
