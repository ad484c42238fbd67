//! File-backed string store
//!
//! Write-through JSON snapshot of the whole map: every mutation rewrites
//! the snapshot file via a temp-file-and-rename so a crash mid-write never
//! leaves a torn snapshot behind. Suited to small key spaces; there is no
//! incremental log.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::debug;

use lodestore_core::{Error, Result};

use crate::backend::StringStore;

/// Persistent store backed by a single JSON snapshot file
///
/// The in-memory map is authoritative between mutations; on a persist
/// failure the error is returned and the file keeps its previous snapshot.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open a store at `path`, loading the snapshot if one exists
    ///
    /// # Errors
    ///
    /// `Error::Io` if the file exists but cannot be read;
    /// `Error::Corruption` if its contents are not a valid snapshot.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let map = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                Error::Corruption(format!("snapshot {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(target: "lodestore::storage", path = %path.display(), "opened file store");
        Ok(Self {
            path,
            inner: RwLock::new(map),
        })
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StringStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.inner.write();
        map.insert(key.to_string(), value.to_string());
        self.persist(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.inner.write();
        if map.remove(key).is_some() {
            return self.persist(&map);
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut map = self.inner.write();
        map.clear();
        self.persist(&map)
    }
}
