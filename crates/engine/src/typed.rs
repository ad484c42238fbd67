//! TypedStore: typed facade over a string backend
//!
//! ## Design
//!
//! TypedStore is a stateless facade: it holds an `Arc` to the backend and
//! the codec, and every operation is a single pass through both. Reads
//! never touch anything but the backend and the codec; absence
//! short-circuits before the codec runs.
//!
//! Multiple TypedStore instances over the same backend are safe.

use std::sync::Arc;

use tracing::trace;

use lodestore_core::schema::{FromValue, TypedKey};
use lodestore_core::{Result, Value, ValueCodec};
use lodestore_storage::StringStore;

/// Typed key/value facade composing a backend with the coercion codec
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lodestore_core::{Value, ValueCodec};
/// use lodestore_engine::TypedStore;
/// use lodestore_storage::MemoryStore;
///
/// let store = TypedStore::new(Arc::new(MemoryStore::new()), ValueCodec::default());
/// store.set("greeting", &Value::String("hello".into())).unwrap();
/// assert_eq!(store.get("greeting").unwrap(), Some(Value::String("hello".into())));
/// ```
pub struct TypedStore<B> {
    backend: Arc<B>,
    codec: ValueCodec,
}

impl<B: StringStore> TypedStore<B> {
    /// Create a typed store over `backend` using `codec`
    pub fn new(backend: Arc<B>, codec: ValueCodec) -> Self {
        Self { backend, codec }
    }

    /// The underlying backend reference
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// The codec in use
    pub fn codec(&self) -> &ValueCodec {
        &self.codec
    }

    /// Encode `value` and write it under `key`
    ///
    /// # Errors
    ///
    /// Encoding failures (`UnsupportedType`) and backend rejections
    /// (quota, I/O) propagate unchanged; nothing is retried.
    pub fn set(&self, key: &str, value: &Value) -> Result<()> {
        let raw = self.codec.encode(key, value)?;
        trace!(target: "lodestore::engine", key, "set");
        self.backend.set(key, &raw)
    }

    /// Read and decode the value under `key`
    ///
    /// Returns `None` for an absent entry without invoking the codec.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend read fails; decoding itself
    /// never fails.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        match self.backend.get(key)? {
            None => Ok(None),
            Some(raw) => Ok(Some(self.codec.decode(key, &raw))),
        }
    }

    /// Remove the entry under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn remove(&self, key: &str) -> Result<()> {
        trace!(target: "lodestore::engine", key, "remove");
        self.backend.remove(key)
    }

    /// Remove every entry from the backend
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn clear(&self) -> Result<()> {
        trace!(target: "lodestore::engine", "clear");
        self.backend.clear()
    }

    // ========== Schema-typed convenience ==========

    /// Write a value under a typed key
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TypedStore::set`].
    pub fn set_key<T: Into<Value>>(&self, key: &TypedKey<T>, value: T) -> Result<()> {
        self.set(key.name(), &value.into())
    }

    /// Read a value under a typed key
    ///
    /// Returns `None` when the entry is absent or when the decoded value
    /// does not match the key's declared type.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn get_key<T: FromValue>(&self, key: &TypedKey<T>) -> Result<Option<T>> {
        Ok(self.get(key.name())?.and_then(T::from_value))
    }
}
