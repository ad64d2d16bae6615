//! Service read handlers. Same tenant scoping as datacenters.

use crate::domain::authz::{can_read, read_scope};
use crate::domain::error::{GatewayError, GatewayResult};
use crate::domain::projection::Projector;
use crate::ports::outbound::ResourceBackend;
use shared_types::{AuthenticatedUser, EntityQuery, Resource, Service};
use std::sync::Arc;

#[derive(Clone)]
pub struct ServiceHandlers {
    services: Arc<dyn ResourceBackend<Service>>,
    projector: Projector<Service>,
}

impl ServiceHandlers {
    pub fn new(services: Arc<dyn ResourceBackend<Service>>) -> Self {
        Self {
            services,
            projector: Projector::default(),
        }
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> GatewayResult<Vec<Service>> {
        Ok(self
            .services
            .find_all()
            .await?
            .into_iter()
            .filter(|s| can_read(user, s))
            .map(|s| self.projector.project(s, true))
            .collect())
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: &str) -> GatewayResult<Service> {
        let query = EntityQuery::by_id(id).in_group(read_scope(user));
        match self.services.get(query).await? {
            Some(s) if can_read(user, &s) => Ok(self.projector.project(s, false)),
            _ => Err(GatewayError::not_found(Service::KIND)),
        }
    }
}
