//! # Datacenter Lifecycle
//!
//! ```text
//! absent ──create──→ active ──update──→ active
//!                      │
//!                      └──delete──→ deleted (terminal)
//! ```
//!
//! | Operation | Checks, in order |
//! |---|---|
//! | list   | admin: all; member: own group (filtered here) |
//! | get    | tenant-scoped lookup; miss or foreign tenant → not found |
//! | create | assigned group → body → trimmed name → validation → global name uniqueness → stamp → save |
//! | update | exists → ownership → credential fields only → save |
//! | delete | exists → ownership → no referencing services → delete |
//!
//! Deletion is blocked while services reference the datacenter; it is
//! never cascaded.

use crate::domain::authz::{can_read, can_write, read_scope, stamp_for_create, NO_GROUP_MESSAGE};
use crate::domain::error::{GatewayError, GatewayResult};
use crate::domain::projection::{Enricher, Projector};
use crate::domain::validation::{parse_body, validate_datacenter, CredentialsUpdate};
use crate::ports::outbound::ResourceBackend;
use shared_types::{AuthenticatedUser, Datacenter, EntityQuery, Resource, Service};
use std::sync::Arc;
use tracing::{info, warn};

const KIND: &str = Datacenter::KIND;

/// Datacenter handlers over abstract backends.
#[derive(Clone)]
pub struct DatacenterHandlers {
    datacenters: Arc<dyn ResourceBackend<Datacenter>>,
    services: Arc<dyn ResourceBackend<Service>>,
    projector: Projector<Datacenter>,
}

impl DatacenterHandlers {
    pub fn new(
        datacenters: Arc<dyn ResourceBackend<Datacenter>>,
        services: Arc<dyn ResourceBackend<Service>>,
    ) -> Self {
        Self {
            datacenters,
            services,
            projector: Projector::default(),
        }
    }

    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher<Datacenter>>) -> Self {
        self.projector = Projector::new(enricher);
        self
    }

    /// Datacenters visible to the caller, always redacted.
    pub async fn list(&self, user: &AuthenticatedUser) -> GatewayResult<Vec<Datacenter>> {
        let all = self.datacenters.find_all().await?;

        Ok(all
            .into_iter()
            .filter(|dc| can_read(user, dc))
            .map(|dc| self.projector.project(dc, true))
            .collect())
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: &str) -> GatewayResult<Datacenter> {
        let query = EntityQuery::by_id(id).in_group(read_scope(user));

        let dc = match self.datacenters.get(query).await? {
            Some(dc) if can_read(user, &dc) => dc,
            Some(_) | None => return Err(GatewayError::not_found(KIND)),
        };

        let redact = dc.group_id != user.group_id;
        Ok(self.projector.project(dc, redact))
    }

    pub async fn create(&self, user: &AuthenticatedUser, body: &[u8]) -> GatewayResult<Datacenter> {
        if !user.has_group() {
            warn!(user = %user.username, "Create by user without a group rejected");
            return Err(GatewayError::unauthorized(NO_GROUP_MESSAGE));
        }

        let mut dc: Datacenter = parse_body(body)?;
        dc.name = dc.name.trim().to_string();
        validate_datacenter(&dc)?;
        stamp_for_create(user, &mut dc)?;

        if self.datacenters.find_by_name(&dc.name).await?.is_some() {
            warn!(name = %dc.name, group_id = user.group_id, "Datacenter name already taken");
            return Err(GatewayError::conflict("Specified datacenter already exists"));
        }

        let saved = self.datacenters.save(dc).await?;
        info!(
            entity_id = %saved.id,
            group_id = saved.group_id,
            user = %user.username,
            "Datacenter created"
        );
        Ok(self.projector.project(saved, false))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: &str,
        body: &[u8],
    ) -> GatewayResult<Datacenter> {
        let update: CredentialsUpdate = parse_body(body)?;
        let mut existing = self.owned(user, id).await?;

        update.apply(&mut existing);
        let saved = self.datacenters.save(existing).await?;
        info!(entity_id = %saved.id, user = %user.username, "Datacenter credentials updated");

        let redact = saved.group_id != user.group_id;
        Ok(self.projector.project(saved, redact))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: &str) -> GatewayResult<()> {
        let existing = self.owned(user, id).await?;

        let referencing = self.referencing_services(&existing.id).await?;
        if !referencing.is_empty() {
            warn!(
                entity_id = %existing.id,
                services = referencing.len(),
                "Delete blocked by referencing services"
            );
            return Err(GatewayError::conflict(
                "Existing services are referring to this datacenter.",
            ));
        }

        self.datacenters.delete(&existing.id).await?;
        info!(entity_id = %existing.id, user = %user.username, "Datacenter deleted");
        Ok(())
    }

    /// Services that point at `datacenter_id`. `find` is unfiltered, so the
    /// filtering happens here.
    pub async fn referencing_services(&self, datacenter_id: &str) -> GatewayResult<Vec<Service>> {
        Ok(self
            .services
            .find_all()
            .await?
            .into_iter()
            .filter(|s| s.datacenter_id == datacenter_id)
            .collect())
    }

    /// Unscoped lookup followed by an ownership check. The caller already
    /// named the target, so a foreign tenant is reported as forbidden.
    async fn owned(&self, user: &AuthenticatedUser, id: &str) -> GatewayResult<Datacenter> {
        let existing = self
            .datacenters
            .find_by_id(id)
            .await?
            .ok_or_else(|| GatewayError::not_found(KIND))?;

        if !can_write(user, &existing) {
            warn!(
                entity_id = %id,
                owner = existing.group_id,
                group_id = user.group_id,
                "Write to datacenter of another group denied"
            );
            return Err(GatewayError::forbidden(
                "Datacenter belongs to a different group",
            ));
        }
        Ok(existing)
    }
}
