//! Resource lifecycle handlers.
//!
//! validation → authorization → backend call → projection → response.
//! Each handler depends only on [`ResourceBackend`](crate::ports::ResourceBackend).

pub mod datacenters;
pub mod services;

pub use datacenters::DatacenterHandlers;
pub use services::ServiceHandlers;
