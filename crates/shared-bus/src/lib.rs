//! # Shared Bus - Publish/Subscribe With Request/Reply
//!
//! All traffic between the gateway and the backend capabilities goes through
//! a [`MessageBus`]. The bus itself is fire-and-forget: a publish reaches
//! whoever is subscribed to the subject at that instant and nothing else.
//! [`RpcClient`] turns that into a blocking, timeout-bounded call.
//!
//! ## Request/Reply
//!
//! ```text
//! ┌──────────────┐  1. subscribe(_INBOX.<uuid>)   ┌──────────────┐
//! │  RpcClient   │ ─────────────────────────────→ │              │
//! │              │  2. publish(subject, reply)    │  MessageBus  │
//! │              │ ─────────────────────────────→ │              │
//! └──────────────┘                                └──────┬───────┘
//!        ↑                                               │
//!        │ 4. exactly one reply, or Timeout              ▼
//!        │                                        ┌──────────────┐
//!        └──────── 3. publish(reply, payload) ─── │  Capability  │
//!                                                 └──────────────┘
//! ```
//!
//! The reply listener is a [`Subscription`]; dropping it deregisters the
//! route, so every exit path of a call (reply, decode failure, timeout,
//! cancellation) tears the listener down.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod backoff;
pub mod message;
pub mod publisher;
pub mod reply;
pub mod rpc;
pub mod subscriber;

// Re-export main types
pub use backoff::{retry_with_backoff, BackoffPolicy};
pub use message::BusMessage;
pub use publisher::{BusError, InMemoryMessageBus, MessageBus};
pub use reply::ReplyAddress;
pub use rpc::{respond, RpcClient, RpcError, RpcStats};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum messages buffered per subscription before new ones are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
