//! Live layer for lodestore
//!
//! Adds deferred, key-scoped change notifications on top of the typed
//! store:
//! - `EventEmitter`: topic-addressed pub/sub registry
//! - `DeferQueue`: FIFO deferred-execution queue modeling the
//!   run-after-current-turn contract
//! - `LiveStore`: the composition root exposing subscribe/unsubscribe
//!   alongside the typed get/set/remove/clear surface

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod defer;
pub mod emitter;
pub mod store;

pub use defer::DeferQueue;
pub use emitter::{EventEmitter, ListenerId};
pub use store::{Change, LiveStore};
