//! # Resource Store Bus Adapter
//!
//! Connects a [`CapabilityHandler`] to the shared bus: one durable
//! subscription and one task per capability subject.
//!
//! Messages on one subject are handled one at a time in arrival order.
//! Different subjects run concurrently and share nothing but the store.

use crate::ports::outbound::EntityStore;
use crate::service::CapabilityHandler;
use shared_bus::{respond, BusError, MessageBus, Subscription};
use shared_types::{Operation, Resource, Subjects};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Serves `<kind>.get/.find/.set/.del` for one entity kind.
pub struct CapabilityService<E, S> {
    bus: Arc<dyn MessageBus>,
    handler: CapabilityHandler<E, S>,
}

impl<E, S> CapabilityService<E, S>
where
    E: Resource,
    S: EntityStore<E> + 'static,
{
    pub fn new(bus: Arc<dyn MessageBus>, store: Arc<S>) -> Self {
        Self {
            bus,
            handler: CapabilityHandler::new(store),
        }
    }

    /// Subscribe to every capability subject and start serving.
    ///
    /// All subscriptions are registered before this returns, so requests
    /// published afterwards are never missed.
    pub async fn start(self) -> Result<RunningCapability, BusError> {
        let subjects = Subjects::of::<E>();
        let mut subscriptions = Vec::with_capacity(Operation::ALL.len());
        for operation in Operation::ALL {
            let subscription = self.bus.subscribe(&subjects.subject(operation)).await?;
            subscriptions.push((operation, subscription));
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let tasks = subscriptions
            .into_iter()
            .map(|(operation, subscription)| {
                tokio::spawn(serve(
                    Arc::clone(&self.bus),
                    self.handler.clone(),
                    operation,
                    subscription,
                    shutdown_rx.clone(),
                ))
            })
            .collect();

        info!(kind = E::KIND, "Capability service started");

        Ok(RunningCapability {
            kind: E::KIND,
            shutdown: shutdown_tx,
            tasks,
        })
    }
}

/// Handle to a started [`CapabilityService`].
pub struct RunningCapability {
    kind: &'static str,
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl RunningCapability {
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Stop every subject loop and wait for them to finish. Subscriptions are
    /// released when the loops exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        for task in self.tasks {
            if let Err(e) = task.await {
                error!(kind = self.kind, error = %e, "Capability task failed");
            }
        }
        info!(kind = self.kind, "Capability service stopped");
    }
}

async fn serve<E, S>(
    bus: Arc<dyn MessageBus>,
    handler: CapabilityHandler<E, S>,
    operation: Operation,
    mut subscription: Subscription,
    mut shutdown: watch::Receiver<bool>,
) where
    E: Resource,
    S: EntityStore<E>,
{
    debug!(subject = subscription.subject(), "Listening");

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            message = subscription.recv() => {
                let Some(message) = message else {
                    warn!(subject = subscription.subject(), "Bus closed, capability loop exiting");
                    break;
                };

                let reply = handler.handle(operation, &message.payload);
                if let Err(e) = respond(bus.as_ref(), &message, reply).await {
                    warn!(subject = %message.subject, error = %e, "Reply could not be published");
                }
            }
        }
    }
}
