//! # Publisher
//!
//! The transport seam ([`MessageBus`]) and its in-process implementation.

use crate::message::BusMessage;
use crate::reply::ReplyAddress;
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Errors raised by a bus transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The bus has been shut down.
    #[error("bus closed")]
    Closed,

    /// The transport refused the subscription.
    #[error("subscribe to {subject} failed: {reason}")]
    Subscribe { subject: String, reason: String },
}

/// Publish/subscribe transport.
///
/// Implementations must be safe for concurrent use; the gateway and every
/// capability share one handle.
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Publish a payload on a subject, optionally naming a reply subject.
    ///
    /// # Returns
    ///
    /// The number of subscriptions the message was delivered to. Zero is not
    /// an error: publishing is fire-and-forget.
    async fn publish(
        &self,
        subject: &str,
        reply: Option<&str>,
        payload: Bytes,
    ) -> Result<usize, BusError>;

    /// Register a listener on a subject. Dropping the returned handle
    /// deregisters it.
    async fn subscribe(&self, subject: &str) -> Result<Subscription, BusError>;

    /// Total number of publish calls accepted.
    fn messages_published(&self) -> u64;
}

/// One registered listener.
struct Route {
    id: u64,
    sender: mpsc::Sender<BusMessage>,
}

type RouteTable = DashMap<String, Vec<Route>>;

/// In-process bus with per-subject routing.
///
/// Every subscriber gets its own bounded queue, so a slow subscriber drops
/// its own messages instead of stalling publishers.
pub struct InMemoryMessageBus {
    /// Subject to listeners.
    routes: Arc<RouteTable>,

    /// Route id generator.
    next_route_id: AtomicU64,

    /// Total publish calls.
    messages_published: AtomicU64,

    /// Set once the bus has been shut down.
    closed: AtomicBool,

    /// Per-subscription queue capacity.
    capacity: usize,
}

impl InMemoryMessageBus {
    /// Create a new in-memory bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory bus with specified per-subscription capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            routes: Arc::new(DashMap::new()),
            next_route_id: AtomicU64::new(1),
            messages_published: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            capacity: capacity.max(1),
        }
    }

    /// Number of live subscriptions on a subject.
    #[must_use]
    pub fn subscriber_count(&self, subject: &str) -> usize {
        self.routes.get(subject).map_or(0, |routes| routes.len())
    }

    /// Number of subjects with at least one live subscription.
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.routes.len()
    }

    /// Get the per-subscription capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the bus has been shut down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Shut the bus down. Pending `recv` calls return `None`; further
    /// publish and subscribe calls fail with [`BusError::Closed`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.routes.clear();
        debug!("In-memory bus closed");
    }
}

impl Default for InMemoryMessageBus {
    fn default() -> Self {
        Self::new()
    }
}

fn remove_route(routes: &Weak<RouteTable>, subject: &str, id: u64) {
    let Some(routes) = routes.upgrade() else {
        return;
    };

    let now_empty = match routes.get_mut(subject) {
        Some(mut listeners) => {
            listeners.retain(|route| route.id != id);
            listeners.is_empty()
        }
        None => false,
    };

    // The shard guard above must be released before removing the key.
    if now_empty {
        routes.remove_if(subject, |_, listeners| listeners.is_empty());
    }
}

#[async_trait]
impl MessageBus for InMemoryMessageBus {
    async fn publish(
        &self,
        subject: &str,
        reply: Option<&str>,
        payload: Bytes,
    ) -> Result<usize, BusError> {
        if self.is_closed() {
            return Err(BusError::Closed);
        }

        self.messages_published.fetch_add(1, Ordering::Relaxed);

        let senders: Vec<mpsc::Sender<BusMessage>> = self
            .routes
            .get(subject)
            .map(|routes| routes.iter().map(|route| route.sender.clone()).collect())
            .unwrap_or_default();

        if senders.is_empty() {
            if ReplyAddress::is_reply_subject(subject) {
                // Caller already gave up on this reply.
                debug!(subject = subject, "Late reply dropped (listener gone)");
            } else {
                warn!(subject = subject, "Message dropped (no subscribers)");
            }
            return Ok(0);
        }

        let message = BusMessage::new(subject, reply.map(str::to_string), payload);
        let mut delivered = 0;
        for sender in senders {
            match sender.try_send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(subject = subject, "Subscriber queue full, message dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!(subject = subject, "Subscriber went away during publish");
                }
            }
        }

        debug!(
            subject = subject,
            reply = reply.unwrap_or(""),
            receivers = delivered,
            "Message published"
        );

        Ok(delivered)
    }

    async fn subscribe(&self, subject: &str) -> Result<Subscription, BusError> {
        if self.is_closed() {
            return Err(BusError::Closed);
        }

        let (sender, receiver) = mpsc::channel(self.capacity);
        let id = self.next_route_id.fetch_add(1, Ordering::Relaxed);

        self.routes
            .entry(subject.to_string())
            .or_default()
            .push(Route { id, sender });

        debug!(subject = subject, route_id = id, "New subscription created");

        let routes = Arc::downgrade(&self.routes);
        let key = subject.to_string();
        Ok(Subscription::new(subject, receiver, move || {
            remove_route(&routes, &key, id)
        }))
    }

    fn messages_published(&self) -> u64 {
        self.messages_published.load(Ordering::Relaxed)
    }
}
