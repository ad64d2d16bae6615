//! Backend adapter that dispatches straight into an [`EntityStore`].
//!
//! Same matching rule as the bus capability, no transport in between.

use crate::domain::error::GatewayError;
use crate::ports::outbound::ResourceBackend;
use async_trait::async_trait;
use resource_store::{matches_query, EntityStore};
use shared_types::{EntityQuery, Resource};
use std::marker::PhantomData;
use std::sync::Arc;

/// In-process [`ResourceBackend`].
pub struct StoreBackend<E, S> {
    store: Arc<S>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> StoreBackend<E, S>
where
    E: Resource,
    S: EntityStore<E>,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

#[async_trait]
impl<E, S> ResourceBackend<E> for StoreBackend<E, S>
where
    E: Resource,
    S: EntityStore<E> + 'static,
{
    async fn get(&self, query: EntityQuery) -> Result<Option<E>, GatewayError> {
        Ok(self
            .store
            .find_all()?
            .into_iter()
            .find(|e| matches_query(&query, e)))
    }

    async fn find_all(&self) -> Result<Vec<E>, GatewayError> {
        Ok(self.store.find_all()?)
    }

    async fn save(&self, entity: E) -> Result<E, GatewayError> {
        Ok(self.store.save(entity)?)
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.store.delete(id)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<E>, GatewayError> {
        Ok(self.store.find_by_id(id)?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<E>, GatewayError> {
        Ok(self.store.find_by_name(name)?)
    }
}
