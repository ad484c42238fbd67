//! Topic-addressed publish/subscribe registry
//!
//! Listeners register under a topic string and get back a stable
//! identifier for later removal. Emission invokes every listener for the
//! topic synchronously, in registration order. The registry snapshots the
//! listener list before invoking, so a listener may subscribe or
//! unsubscribe from inside its own callback without deadlocking.

use std::collections::HashMap;

use parking_lot::RwLock;
use uuid::Uuid;

/// Stable identifier for a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

type Listener<T> = std::sync::Arc<dyn Fn(&T) + Send + Sync>;

/// Topic-addressed pub/sub registry
///
/// # Example
///
/// ```
/// use lodestore_live::EventEmitter;
///
/// let emitter: EventEmitter<i64> = EventEmitter::new();
/// let id = emitter.on("counter", |n| println!("counter is now {n}"));
/// emitter.emit("counter", &1);
/// emitter.off("counter", id);
/// ```
#[derive(Default)]
pub struct EventEmitter<T> {
    topics: RwLock<HashMap<String, Vec<(ListenerId, Listener<T>)>>>,
}

impl<T> EventEmitter<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
        }
    }

    /// Register `listener` under `topic`, returning its identifier
    pub fn on(&self, topic: &str, listener: impl Fn(&T) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId::new();
        self.topics
            .write()
            .entry(topic.to_string())
            .or_default()
            .push((id, std::sync::Arc::new(listener)));
        id
    }

    /// Remove the registration for `id` under `topic`
    ///
    /// Idempotent: an unknown identifier (or topic) is a no-op, and no
    /// other registration is affected.
    pub fn off(&self, topic: &str, id: ListenerId) {
        if let Some(listeners) = self.topics.write().get_mut(topic) {
            listeners.retain(|(lid, _)| *lid != id);
        }
    }

    /// Invoke every listener registered under `topic`, in registration order
    pub fn emit(&self, topic: &str, payload: &T) {
        // Snapshot outside the lock so callbacks may re-enter the registry
        let listeners: Vec<Listener<T>> = match self.topics.read().get(topic) {
            Some(listeners) => listeners.iter().map(|(_, l)| l.clone()).collect(),
            None => return,
        };
        for listener in listeners {
            listener(payload);
        }
    }

    /// Number of listeners currently registered under `topic`
    pub fn listener_count(&self, topic: &str) -> usize {
        self.topics.read().get(topic).map_or(0, Vec::len)
    }
}
