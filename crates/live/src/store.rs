//! LiveStore: typed store with deferred change notifications
//!
//! ## Design
//!
//! LiveStore composes a [`TypedStore`] with a pub/sub registry, an
//! active-key set and a defer queue. Every mutation schedules its
//! notification *before* touching the backend, in program order, so
//! rapid same-key writes each deliver their own correctly-valued event,
//! in write order, once the queue is drained.
//!
//! ## Active-key tracking
//!
//! The active-key set records the keys this instance has written and not
//! since removed. It is never persisted: a fresh instance over a populated
//! backend starts believing no keys are active, and two instances over the
//! same backend track independently and can diverge. Accepted limitation.
//!
//! ## `clear` and notifications
//!
//! `clear` schedules one deferred task that walks the active-key set as it
//! is *at emission time*, then empties the set synchronously before
//! returning. By the time the task runs the set is already empty, so no
//! clear-notifications are delivered. This reproduces the reference
//! behavior; see DESIGN.md for the decision record.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use lodestore_core::schema::{FromValue, TypedKey};
use lodestore_core::{Result, Value, ValueCodec};
use lodestore_engine::TypedStore;
use lodestore_storage::{MemoryStore, StringStore};

use crate::defer::DeferQueue;
use crate::emitter::{EventEmitter, ListenerId};

/// Payload delivered to key subscribers: the value written, or `None` for
/// a removal
pub type Change = Option<Value>;

/// Typed store with per-key change subscriptions
///
/// # Example
///
/// ```
/// use lodestore_core::Value;
/// use lodestore_live::LiveStore;
///
/// let store = LiveStore::ephemeral();
/// store.on("counter", |change| println!("counter changed: {change:?}"));
/// store.set("counter", &Value::Int(1)).unwrap();
/// // Nothing delivered yet; notifications run on the next drain
/// store.queue().run_until_idle();
/// ```
pub struct LiveStore<B> {
    typed: TypedStore<B>,
    emitter: Arc<EventEmitter<Change>>,
    active: Arc<Mutex<HashSet<String>>>,
    queue: Arc<DeferQueue>,
}

impl<B: StringStore> LiveStore<B> {
    /// Create a live store over `backend` with `codec`, scheduling
    /// notifications onto `queue`
    pub fn new(backend: Arc<B>, codec: ValueCodec, queue: Arc<DeferQueue>) -> Self {
        Self {
            typed: TypedStore::new(backend, codec),
            emitter: Arc::new(EventEmitter::new()),
            active: Arc::new(Mutex::new(HashSet::new())),
            queue,
        }
    }

    /// The queue notifications are scheduled onto
    pub fn queue(&self) -> &Arc<DeferQueue> {
        &self.queue
    }

    /// Read and decode the value under `key`
    ///
    /// Reads never touch the notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        self.typed.get(key)
    }

    /// Write `value` under `key` and schedule a change notification
    ///
    /// The scheduled emission closes over the exact value passed to this
    /// call. The notification is scheduled and the key marked active
    /// before the backend write runs, matching the reference step order;
    /// a rejected write therefore still leaves both in place.
    ///
    /// # Errors
    ///
    /// Encoding failures and backend rejections propagate unchanged.
    pub fn set(&self, key: &str, value: &Value) -> Result<()> {
        let emitter = Arc::clone(&self.emitter);
        let topic = key.to_string();
        let change = Some(value.clone());
        self.queue.defer(move || emitter.emit(&topic, &change));

        self.active.lock().insert(key.to_string());
        self.typed.set(key, value)
    }

    /// Remove the entry under `key` and schedule a removal notification
    ///
    /// Subscribers receive `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn remove(&self, key: &str) -> Result<()> {
        let emitter = Arc::clone(&self.emitter);
        let topic = key.to_string();
        self.queue.defer(move || emitter.emit(&topic, &None));

        self.active.lock().remove(key);
        self.typed.remove(key)
    }

    /// Wipe the backend and empty the active-key set
    ///
    /// Schedules a task that emits `None` for every key in the active-key
    /// set at emission time, then empties the set synchronously. See the
    /// module docs: in practice the task observes an empty set and no
    /// notifications are delivered.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn clear(&self) -> Result<()> {
        let emitter = Arc::clone(&self.emitter);
        let active = Arc::clone(&self.active);
        self.queue.defer(move || {
            let keys: Vec<String> = active.lock().iter().cloned().collect();
            debug!(
                target: "lodestore::live",
                keys = keys.len(),
                "clear notification task running"
            );
            for key in keys {
                emitter.emit(&key, &None);
            }
        });

        self.active.lock().clear();
        self.typed.clear()
    }

    /// Subscribe to changes for `key`
    ///
    /// The callback receives `Some(value)` for each write and `None` for
    /// each removal, once per mutation, in mutation order, delivered only
    /// when the queue is drained. Multiple subscriptions on the same key
    /// are all invoked, in registration order.
    pub fn on(&self, key: &str, callback: impl Fn(&Change) + Send + Sync + 'static) -> ListenerId {
        self.emitter.on(key, callback)
    }

    /// Remove the subscription `id` for `key`
    ///
    /// Idempotent: an identifier that was never issued, or was already
    /// removed, is a no-op.
    pub fn off(&self, key: &str, id: ListenerId) {
        self.emitter.off(key, id);
    }

    // ========== Schema-typed convenience ==========

    /// Write a value under a typed key, with notification
    ///
    /// # Errors
    ///
    /// Same failure modes as [`LiveStore::set`].
    pub fn set_key<T: Into<Value>>(&self, key: &TypedKey<T>, value: T) -> Result<()> {
        self.set(key.name(), &value.into())
    }

    /// Read a value under a typed key
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn get_key<T: FromValue>(&self, key: &TypedKey<T>) -> Result<Option<T>> {
        self.typed.get_key(key)
    }
}

impl LiveStore<MemoryStore> {
    /// In-memory live store with default coercion and a fresh queue
    pub fn ephemeral() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            ValueCodec::default(),
            Arc::new(DeferQueue::new()),
        )
    }
}
