//! Change Broadcaster - fan-out of mutation events to connected observers.
//!
//! A thin wrapper over a `tokio::sync::broadcast` channel. The channel is
//! the concurrency-safe observer registry: receivers join on subscribe,
//! leave when dropped, and each receiver sees events in publish order
//! (the single global commit-order stream). Delivery is fire-and-forget;
//! there is no acknowledgment, retry, or replay of missed events.

use serde::Serialize;
use tokio::sync::broadcast;

/// Buffered events per observer before a slow observer starts lagging.
const CHANNEL_CAPACITY: usize = 256;

/// Tag identifying what changed. The wire names match the event names the
/// admin frontend subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CategoryUpdated,
    CategoryDeleted,
    SubcategoryUpdated,
    SubcategoryDeleted,
    ProductUpdated,
    ProductDeleted,
    NewOrder,
    ProfileUpdated,
    FaqUpdated,
    ContactUpdated,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CategoryUpdated => "categoryUpdated",
            Self::CategoryDeleted => "categoryDeleted",
            Self::SubcategoryUpdated => "subcategoryUpdated",
            Self::SubcategoryDeleted => "subcategoryDeleted",
            Self::ProductUpdated => "productUpdated",
            Self::ProductDeleted => "productDeleted",
            Self::NewOrder => "newOrder",
            Self::ProfileUpdated => "profileUpdated",
            Self::FaqUpdated => "faqUpdated",
            Self::ContactUpdated => "contactUpdated",
        }
    }
}

/// A published mutation: event tag plus the resolved entity payload.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub kind: EventKind,
    pub data: serde_json::Value,
}

/// Concurrency-safe observer registry and event fan-out.
#[derive(Debug, Clone)]
pub struct ChangeBroadcaster {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish a change event to every connected observer.
    ///
    /// Never fails the caller: a serialization problem is logged and the
    /// event dropped; zero connected observers is not an error.
    pub fn publish<T: Serialize>(&self, kind: EventKind, entity: &T) {
        let data = match serde_json::to_value(entity) {
            Ok(data) => data,
            Err(err) => {
                tracing::error!(kind = kind.as_str(), error = %err, "failed to serialize change event");
                return;
            }
        };

        if self.tx.send(ChangeEvent { kind, data }).is_err() {
            tracing::debug!(kind = kind.as_str(), "no observers connected; event dropped");
        }
    }

    /// Register a new observer.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Number of currently connected observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
