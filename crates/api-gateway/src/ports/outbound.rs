//! Outbound ports for the API Gateway.

use crate::domain::error::GatewayError;
use async_trait::async_trait;
use shared_types::{EntityQuery, Resource};

/// Typed access to the backend capability for one entity kind.
///
/// Production: [`BusBackend`](crate::adapters::BusBackend) (request/reply over the bus)
/// Testing: [`StoreBackend`](crate::adapters::StoreBackend) (direct dispatch)
///
/// Lifecycle logic depends only on this trait and is transport-agnostic.
#[async_trait]
pub trait ResourceBackend<E: Resource>: Send + Sync {
    /// First entity matching the query, `None` on a miss.
    async fn get(&self, query: EntityQuery) -> Result<Option<E>, GatewayError>;

    /// Every entity of this kind, unfiltered by tenant.
    async fn find_all(&self) -> Result<Vec<E>, GatewayError>;

    /// Persist; returns the entity with its assigned id.
    async fn save(&self, entity: E) -> Result<E, GatewayError>;

    async fn delete(&self, id: &str) -> Result<(), GatewayError>;

    /// Look up by id across all tenants.
    async fn find_by_id(&self, id: &str) -> Result<Option<E>, GatewayError> {
        self.get(EntityQuery::by_id(id)).await
    }

    /// Look up by name across all tenants.
    async fn find_by_name(&self, name: &str) -> Result<Option<E>, GatewayError> {
        self.get(EntityQuery::by_name(name)).await
    }
}
