//! lodestore - typed key/value persistence with live change notifications
//!
//! lodestore wraps a synchronous string-keyed backend with a typed value
//! layer and an optional change-notification layer:
//!
//! - the **coercion codec** turns typed values into persisted strings and
//!   infers types back out of raw strings, with per-key overrides
//! - the **typed store** composes a backend with the codec
//! - the **live store** adds per-key subscriptions whose events are
//!   delivered after the writing turn finishes, via an explicit FIFO
//!   defer queue
//!
//! # Quick Start
//!
//! ```
//! use lodestore::{LiveStore, Value};
//!
//! let store = LiveStore::ephemeral();
//!
//! store.on("user:name", |change| {
//!     println!("name changed: {change:?}");
//! });
//!
//! store.set("user:name", &Value::String("Alice".into())).unwrap();
//!
//! // Deliveries happen when the host drains the queue
//! store.queue().run_until_idle();
//! ```
//!
//! # Architecture
//!
//! The workspace layers from the bottom up: `lodestore-core` (values,
//! codec, errors), `lodestore-storage` (the `StringStore` contract plus
//! memory and file backends), `lodestore-engine` (the typed facade) and
//! `lodestore-live` (emitter, defer queue, live store). This crate
//! re-exports the public surface of all four.

pub use lodestore_core::{
    DecodeFn, EncodeFn, Error, FromValue, Overrides, Result, TypedKey, Value, ValueCodec,
};
pub use lodestore_engine::TypedStore;
pub use lodestore_live::{Change, DeferQueue, EventEmitter, ListenerId, LiveStore};
pub use lodestore_storage::{FileStore, MemoryStore, StringStore};
