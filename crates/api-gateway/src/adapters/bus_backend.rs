//! Backend adapter that reaches capabilities over the bus.

use crate::domain::error::GatewayError;
use crate::ports::outbound::ResourceBackend;
use async_trait::async_trait;
use bytes::Bytes;
use shared_bus::RpcClient;
use shared_types::{DeleteRequest, EntityQuery, ErrorReply, Operation, Reply, Resource, Subjects};
use std::marker::PhantomData;
use tracing::{error, warn};

/// [`ResourceBackend`] over request/reply on `<kind>.get/.find/.set/.del`.
pub struct BusBackend<E> {
    rpc: RpcClient,
    subjects: Subjects,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Resource> BusBackend<E> {
    pub fn new(rpc: RpcClient) -> Self {
        Self {
            rpc,
            subjects: Subjects::of::<E>(),
            _entity: PhantomData,
        }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    fn subject(&self, operation: Operation) -> String {
        self.subjects.subject(operation)
    }
}

fn backend_failure(subject: &str, reply: ErrorReply) -> GatewayError {
    error!(subject = subject, error = %reply.error, "Backend reported failure");
    GatewayError::internal(reply.error)
}

#[async_trait]
impl<E: Resource> ResourceBackend<E> for BusBackend<E> {
    async fn get(&self, query: EntityQuery) -> Result<Option<E>, GatewayError> {
        let subject = self.subject(Operation::Get);
        let reply: Reply<E> = self.rpc.request(&subject, &query).await?;
        reply
            .into_result()
            .map_err(|e| backend_failure(&subject, e))
    }

    async fn find_all(&self) -> Result<Vec<E>, GatewayError> {
        let subject = self.subject(Operation::Find);
        let reply: Reply<Vec<E>> = self.rpc.request(&subject, &serde_json::json!({})).await?;
        match reply {
            Reply::Value(entities) => Ok(entities),
            Reply::Error(e) => Err(backend_failure(&subject, e)),
        }
    }

    async fn save(&self, entity: E) -> Result<E, GatewayError> {
        let subject = self.subject(Operation::Set);
        let reply: Reply<E> = self.rpc.request(&subject, &entity).await?;
        match reply {
            Reply::Value(saved) if !saved.id().is_empty() => Ok(saved),
            Reply::Value(_) => {
                warn!(subject = %subject, "Backend saved entity without assigning an id");
                Err(GatewayError::internal("backend did not assign an id"))
            }
            Reply::Error(e) => Err(backend_failure(&subject, e)),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let subject = self.subject(Operation::Del);
        let request = shared_types::encode(&DeleteRequest { id: id.to_string() })
            .map_err(|e| GatewayError::internal(e.to_string()))?;

        let reply = self
            .rpc
            .call(&subject, Bytes::from(request), self.rpc.default_timeout())
            .await?;

        if reply.is_empty() {
            return Ok(());
        }
        match shared_types::decode::<ErrorReply>(&reply) {
            Ok(e) => Err(backend_failure(&subject, e)),
            // Any other non-empty body still acknowledges the delete.
            Err(_) => Ok(()),
        }
    }
}
