//! # Subscriber
//!
//! Defines the subscription side of the bus.

use crate::message::BusMessage;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The route was removed or the bus was closed.
    #[error("subscription closed")]
    Closed,
}

/// A subscription handle for receiving messages on one subject.
///
/// When dropped, the route is removed from the bus; messages published
/// afterwards are not delivered to it.
pub struct Subscription {
    /// Subject this subscription listens on.
    subject: String,

    /// Messages routed to this subscription.
    receiver: mpsc::Receiver<BusMessage>,

    /// Deregisters the route from its bus.
    on_drop: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Create a subscription.
    ///
    /// `on_drop` runs exactly once, when the handle is dropped.
    pub fn new(
        subject: impl Into<String>,
        receiver: mpsc::Receiver<BusMessage>,
        on_drop: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            subject: subject.into(),
            receiver,
            on_drop: Some(Box::new(on_drop)),
        }
    }

    /// Receive the next message.
    ///
    /// # Returns
    ///
    /// - `Some(message)` - The next message on the subject
    /// - `None` - The bus was closed
    pub async fn recv(&mut self) -> Option<BusMessage> {
        self.receiver.recv().await
    }

    /// Try to receive the next message without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(message))` - A message was available
    /// - `Ok(None)` - Nothing queued right now
    /// - `Err(SubscriptionError::Closed)` - The bus was closed
    pub fn try_recv(&mut self) -> Result<Option<BusMessage>, SubscriptionError> {
        match self.receiver.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(SubscriptionError::Closed),
        }
    }

    /// Subject this subscription listens on.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(deregister) = self.on_drop.take() {
            deregister();
        }
        debug!(subject = %self.subject, "Subscription dropped");
    }
}
