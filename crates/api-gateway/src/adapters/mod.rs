//! Adapters layer - transport implementations of the outbound port.

pub mod bus_backend;
pub mod error_conversions;
pub mod store_backend;

pub use bus_backend::BusBackend;
pub use store_backend::StoreBackend;
