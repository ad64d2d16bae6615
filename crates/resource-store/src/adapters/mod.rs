//! Store adapters.

pub mod memory;
