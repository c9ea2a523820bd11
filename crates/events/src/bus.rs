//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus distributes already-committed events to external consumers. It
//! is not a store: the catalog and registry state are the source of truth,
//! and a failed publish never rolls anything back.
//!
//! - **Broadcast**: every subscription receives every message published
//!   after it subscribed.
//! - **Ordered per publisher**: messages from one aggregate arrive in the
//!   order they were committed.
//! - **No persistence**: a subscriber that was not there misses the message.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use thiserror::Error;

/// Failure to hand a message to the bus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The subscriber list lock was poisoned.
    #[error("event bus poisoned")]
    Poisoned,
}

/// A subscription to an event stream.
///
/// ```ignore
/// let bus: Arc<dyn EventBus<EventEnvelope<CatalogEvent>>> = ...;
/// let subscription = bus.subscribe();
///
/// while let Ok(envelope) = subscription.recv_timeout(Duration::from_secs(1)) {
///     handle(envelope);
/// }
/// ```
///
/// Subscriptions are meant for a single consuming thread.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain every message currently queued without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// Object-safe so the registry and catalogs can share one bus as
/// `Arc<dyn EventBus<M>>` without knowing the transport.
///
/// The trait requires `Send + Sync`; multiple threads may publish at once.
pub trait EventBus<M>: Send + Sync {
    fn publish(&self, message: M) -> Result<(), BusError>;

    fn subscribe(&self) -> Subscription<M>;
}
