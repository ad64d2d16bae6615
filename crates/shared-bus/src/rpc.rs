//! # RPC Client
//!
//! Synchronous call semantics over the fire-and-forget bus.
//!
//! Flow:
//! 1. Generate a [`ReplyAddress`] unique to the call
//! 2. Subscribe to it before anything is published, so a fast reply is not lost
//! 3. Publish the request on the target subject, naming the reply address
//! 4. Wait for one message on the reply address, bounded by the timeout
//! 5. Drop the listener (the route is removed on every exit path)
//!
//! Calls are at-most-once. Nothing here retries.

use crate::message::BusMessage;
use crate::publisher::{BusError, MessageBus};
use crate::reply::ReplyAddress;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::PayloadError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// RPC failure modes.
#[derive(Debug, Error)]
pub enum RpcError {
    /// No reply within the bound.
    #[error("no reply on {subject} within {timeout:?}")]
    Timeout { subject: String, timeout: Duration },

    /// The reply arrived but is not a valid encoding of the expected type.
    #[error("reply on {subject} could not be decoded: {source}")]
    Deserialization {
        subject: String,
        #[source]
        source: PayloadError,
    },

    /// The request could not be encoded.
    #[error("request for {subject} could not be encoded: {source}")]
    Serialization {
        subject: String,
        #[source]
        source: PayloadError,
    },

    /// The reply listener was closed before a reply arrived.
    #[error("reply listener for {subject} closed")]
    Closed { subject: String },

    /// Transport failure.
    #[error(transparent)]
    Bus(#[from] BusError),
}

impl RpcError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RpcError::Timeout { .. })
    }
}

/// Counters for calls issued through one client.
#[derive(Debug, Default)]
pub struct RpcStats {
    /// Total calls started
    pub total_calls: AtomicU64,
    /// Total calls that received a reply
    pub total_completed: AtomicU64,
    /// Total calls that timed out
    pub total_timeouts: AtomicU64,
    /// Total replies that failed to decode
    pub total_decode_failures: AtomicU64,
}

/// Request/reply client over any [`MessageBus`].
///
/// Cheap to clone; clones share the transport and the counters.
#[derive(Clone)]
pub struct RpcClient {
    bus: Arc<dyn MessageBus>,
    default_timeout: Duration,
    stats: Arc<RpcStats>,
}

impl RpcClient {
    pub fn new(bus: Arc<dyn MessageBus>, default_timeout: Duration) -> Self {
        Self {
            bus,
            default_timeout,
            stats: Arc::new(RpcStats::default()),
        }
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    pub fn stats(&self) -> &RpcStats {
        &self.stats
    }

    /// Send raw bytes and wait for the raw reply.
    pub async fn call(
        &self,
        subject: &str,
        payload: Bytes,
        timeout: Duration,
    ) -> Result<Bytes, RpcError> {
        let reply = ReplyAddress::new();
        let started = Instant::now();
        self.stats.total_calls.fetch_add(1, Ordering::Relaxed);

        let mut listener = self.bus.subscribe(reply.as_str()).await?;
        let receivers = self
            .bus
            .publish(subject, Some(reply.as_str()), payload)
            .await?;

        debug!(
            subject = subject,
            correlation_id = reply.correlation_id(),
            receivers = receivers,
            "RPC request published"
        );

        let outcome = tokio::time::timeout(timeout, listener.recv()).await;
        drop(listener);

        match outcome {
            Ok(Some(message)) => {
                self.stats.total_completed.fetch_add(1, Ordering::Relaxed);
                debug!(
                    subject = subject,
                    correlation_id = reply.correlation_id(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "RPC reply received"
                );
                Ok(message.payload)
            }
            Ok(None) => Err(RpcError::Closed {
                subject: subject.to_string(),
            }),
            Err(_) => {
                self.stats.total_timeouts.fetch_add(1, Ordering::Relaxed);
                warn!(
                    subject = subject,
                    correlation_id = reply.correlation_id(),
                    timeout_ms = timeout.as_millis() as u64,
                    "RPC call timed out"
                );
                Err(RpcError::Timeout {
                    subject: subject.to_string(),
                    timeout,
                })
            }
        }
    }

    /// Typed call with the client's default timeout.
    pub async fn request<Req, Resp>(&self, subject: &str, request: &Req) -> Result<Resp, RpcError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        self.request_with_timeout(subject, request, self.default_timeout)
            .await
    }

    /// Typed call with an explicit timeout.
    pub async fn request_with_timeout<Req, Resp>(
        &self,
        subject: &str,
        request: &Req,
        timeout: Duration,
    ) -> Result<Resp, RpcError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let payload = self.encode(subject, request)?;
        let reply = self.call(subject, payload, timeout).await?;

        shared_types::decode(&reply).map_err(|source| {
            self.stats
                .total_decode_failures
                .fetch_add(1, Ordering::Relaxed);
            warn!(subject = subject, error = %source, "RPC reply could not be decoded");
            RpcError::Deserialization {
                subject: subject.to_string(),
                source,
            }
        })
    }

    /// Typed request whose reply body is ignored (acknowledgment only).
    pub async fn notify<Req>(&self, subject: &str, request: &Req) -> Result<(), RpcError>
    where
        Req: Serialize + ?Sized,
    {
        let payload = self.encode(subject, request)?;
        self.call(subject, payload, self.default_timeout).await?;
        Ok(())
    }

    fn encode<Req: Serialize + ?Sized>(&self, subject: &str, request: &Req) -> Result<Bytes, RpcError> {
        shared_types::encode(request)
            .map(Bytes::from)
            .map_err(|source| RpcError::Serialization {
                subject: subject.to_string(),
                source,
            })
    }
}

/// Publish a reply to the sender of `request`.
///
/// Returns `Ok(false)` when the request carried no reply address.
pub async fn respond(
    bus: &dyn MessageBus,
    request: &BusMessage,
    payload: Bytes,
) -> Result<bool, BusError> {
    let Some(reply) = request.reply.as_deref() else {
        warn!(subject = %request.subject, "Request has no reply address, reply dropped");
        return Ok(false);
    };
    bus.publish(reply, None, payload).await?;
    Ok(true)
}
