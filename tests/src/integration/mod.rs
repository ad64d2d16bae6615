//! # Integration Tests
//!
//! Every scenario starts a fresh bus, seeds the stores and serves them
//! through `CapabilityService`; the gateway only ever talks RPC.

pub mod harness;

mod datacenter_lifecycle;
mod http_surface;
mod rpc_flows;
mod runtime_startup;
