//! Outbound projection: redaction, then optional enrichment.
//!
//! Enrichment may attach presentation data but must not move an entity to a
//! different id or tenant; such changes are reverted.

use shared_types::{Datacenter, Resource, Service};
use std::sync::Arc;
use tracing::warn;

/// Removal of secret fields before an entity crosses a trust boundary.
pub trait Redact {
    fn redact(&mut self);
}

impl Redact for Datacenter {
    fn redact(&mut self) {
        Datacenter::redact(self);
    }
}

impl Redact for Service {
    fn redact(&mut self) {}
}

/// Extension point for derived, non-authoritative fields.
pub trait Enricher<E>: Send + Sync {
    fn enrich(&self, entity: &mut E);
}

/// Enricher that leaves entities untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl<E> Enricher<E> for NoEnrichment {
    fn enrich(&self, _entity: &mut E) {}
}

/// Applies redaction and enrichment to outgoing entities.
pub struct Projector<E> {
    enricher: Arc<dyn Enricher<E>>,
}

impl<E> Clone for Projector<E> {
    fn clone(&self) -> Self {
        Self {
            enricher: Arc::clone(&self.enricher),
        }
    }
}

impl<E: Resource + Redact> Default for Projector<E> {
    fn default() -> Self {
        Self::new(Arc::new(NoEnrichment))
    }
}

impl<E: Resource + Redact> Projector<E> {
    pub fn new(enricher: Arc<dyn Enricher<E>>) -> Self {
        Self { enricher }
    }

    pub fn project(&self, mut entity: E, redact: bool) -> E {
        if redact {
            entity.redact();
        }

        let id = entity.id().to_string();
        let group_id = entity.group_id();
        self.enricher.enrich(&mut entity);

        if entity.id() != id || entity.group_id() != group_id {
            warn!(
                kind = E::KIND,
                entity_id = %id,
                group_id = group_id,
                "Enrichment changed identity fields, reverted"
            );
            entity.set_id(id);
            entity.set_group_id(group_id);
        }

        entity
    }
}
