//! The persistent-store contract
//!
//! Everything above this trait treats the backend as an opaque synchronous
//! string-keyed store. Implementations can be swapped without touching the
//! typed or live layers.

use lodestore_core::Result;

/// Synchronous string-keyed persistent store
///
/// The persisted representation is always a string; absence of an entry is
/// distinct from presence of an empty string. All operations block the
/// calling turn.
///
/// Thread safety: implementations must be safe to call concurrently
/// (requires Send + Sync).
pub trait StringStore: Send + Sync {
    /// Get the raw string for `key`, or `None` if no entry exists
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set `key` to `value`, creating or overwriting the entry
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write, e.g. a quota or
    /// permission failure. Callers do not retry.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the entry for `key`
    ///
    /// Removing an absent key is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be written.
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every entry
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be written.
    fn clear(&self) -> Result<()>;
}
