//! # Outbound Ports (Driven Ports)
//!
//! The store the capability handlers resolve queries against. Its query
//! engine is opaque; only these five operations are relied upon.

use crate::domain::errors::StoreError;
use shared_types::Resource;

/// Abstract interface for entity persistence.
///
/// Testing and the default runtime: [`InMemoryStore`](crate::InMemoryStore).
///
/// Implementations must be safe for concurrent use; each capability subject
/// is served by its own task holding a shared handle.
pub trait EntityStore<E: Resource>: Send + Sync {
    /// Look up one entity by id.
    fn find_by_id(&self, id: &str) -> Result<Option<E>, StoreError>;

    /// Every stored entity, in store iteration order.
    fn find_all(&self) -> Result<Vec<E>, StoreError>;

    /// Look up one entity by name.
    fn find_by_name(&self, name: &str) -> Result<Option<E>, StoreError>;

    /// Persist an entity.
    ///
    /// An empty id is an insert and gets a fresh id; a non-empty id replaces
    /// the stored entity in place. Returns the entity as stored.
    fn save(&self, entity: E) -> Result<E, StoreError>;

    /// Remove an entity. Returns whether anything was removed.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
