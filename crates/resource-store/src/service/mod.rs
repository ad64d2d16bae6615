//! # Capability Handlers
//!
//! Transport-free request handling: payload bytes in, reply bytes out.
//! The bus adapter feeds these from subscriptions; tests call them directly.
//!
//! Every handler produces a reply. Store failures answer with an
//! [`ErrorReply`] carrying the failure text rather than going silent.

use crate::domain::matching::matches_query;
use crate::ports::outbound::EntityStore;
use bytes::Bytes;
use serde::Serialize;
use shared_types::{decode_or_default, DeleteRequest, EntityQuery, ErrorReply, Operation, Resource};
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Fallback reply when a reply itself cannot be encoded.
const INTERNAL_ERROR_REPLY: &[u8] = br#"{"error":"internal error"}"#;

/// Answers the four capabilities for one entity kind.
pub struct CapabilityHandler<E, S> {
    store: Arc<S>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> Clone for CapabilityHandler<E, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<E, S> CapabilityHandler<E, S>
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

    /// Dispatch by operation.
    pub fn handle(&self, operation: Operation, payload: &[u8]) -> Bytes {
        match operation {
            Operation::Get => self.get(payload),
            Operation::Find => self.find(payload),
            Operation::Set => self.set(payload),
            Operation::Del => self.del(payload),
        }
    }

    /// First stored entity matching the query, or the not-found sentinel.
    pub fn get(&self, payload: &[u8]) -> Bytes {
        let query: EntityQuery = decode_or_default(payload);

        let entities = match self.store.find_all() {
            Ok(entities) => entities,
            Err(e) => return failure(E::KIND, Operation::Get, e),
        };

        match entities.into_iter().find(|e| matches_query(&query, e)) {
            Some(entity) => encode_reply(&entity),
            None => {
                debug!(
                    kind = E::KIND,
                    entity_id = %query.id,
                    group_id = query.group_id,
                    "No entity matches query"
                );
                encode_reply(&ErrorReply::not_found())
            }
        }
    }

    /// Every stored entity. No tenant filtering happens here.
    pub fn find(&self, _payload: &[u8]) -> Bytes {
        match self.store.find_all() {
            Ok(entities) => encode_reply(&entities),
            Err(e) => failure(E::KIND, Operation::Find, e),
        }
    }

    /// Persist the entity and echo it back with its id.
    ///
    /// A payload that does not decode is stored as `E::default()`: a blank
    /// entity with a fresh id and group 0. Callers validate before sending.
    pub fn set(&self, payload: &[u8]) -> Bytes {
        let entity: E = decode_or_default(payload);
        let is_insert = entity.id().is_empty();

        match self.store.save(entity) {
            Ok(saved) => {
                info!(
                    kind = E::KIND,
                    entity_id = saved.id(),
                    group_id = saved.group_id(),
                    inserted = is_insert,
                    "Entity saved"
                );
                encode_reply(&saved)
            }
            Err(e) => failure(E::KIND, Operation::Set, e),
        }
    }

    /// Remove the entity and acknowledge with an empty payload.
    pub fn del(&self, payload: &[u8]) -> Bytes {
        let request: DeleteRequest = decode_or_default(payload);

        match self.store.delete(&request.id) {
            Ok(true) => {
                info!(kind = E::KIND, entity_id = %request.id, "Entity deleted");
                Bytes::new()
            }
            Ok(false) => {
                debug!(kind = E::KIND, entity_id = %request.id, "Delete of unknown entity");
                Bytes::new()
            }
            Err(e) => failure(E::KIND, Operation::Del, e),
        }
    }
}

fn encode_reply<T: Serialize + ?Sized>(value: &T) -> Bytes {
    match shared_types::encode(value) {
        Ok(bytes) => Bytes::from(bytes),
        Err(e) => {
            error!(error = %e, "Reply could not be encoded");
            Bytes::from_static(INTERNAL_ERROR_REPLY)
        }
    }
}

fn failure(kind: &str, operation: Operation, e: impl Display) -> Bytes {
    error!(kind = kind, operation = %operation, error = %e, "Store operation failed");
    encode_reply(&ErrorReply {
        error: e.to_string(),
    })
}
