//! In-memory string store
//!
//! `BTreeMap` under a `parking_lot::RwLock`, with an optional byte quota.
//! The quota models the bounded backends this layer usually wraps: when a
//! write would push the total of key and value bytes past the limit, `set`
//! fails with `QuotaExceeded` and the map is untouched.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use lodestore_core::{Error, Result};

use crate::backend::StringStore;

#[derive(Default)]
struct Inner {
    map: BTreeMap<String, String>,
    used_bytes: usize,
}

/// In-memory store with an optional byte quota
///
/// Accounting counts key bytes once per entry plus the current value bytes.
/// Overwrites only pay the value delta.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes past `limit` total bytes
    pub fn with_quota(limit: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            quota: Some(limit),
        }
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    /// True when the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.inner.read().map.is_empty()
    }

    /// Total key and value bytes currently held
    pub fn used_bytes(&self) -> usize {
        self.inner.read().used_bytes
    }
}

impl StringStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.read().map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let replaced = inner.map.get(key).map(|v| v.len());
        let needed = match replaced {
            Some(old) => inner.used_bytes - old + value.len(),
            None => inner.used_bytes + key.len() + value.len(),
        };
        if let Some(limit) = self.quota {
            if needed > limit {
                return Err(Error::QuotaExceeded { needed, limit });
            }
        }
        inner.map.insert(key.to_string(), value.to_string());
        inner.used_bytes = needed;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.write();
        if let Some(value) = inner.map.remove(key) {
            inner.used_bytes -= key.len() + value.len();
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut inner = self.inner.write();
        inner.map.clear();
        inner.used_bytes = 0;
        Ok(())
    }
}
