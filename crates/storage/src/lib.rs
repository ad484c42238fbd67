//! Storage backends for lodestore
//!
//! Defines the `StringStore` contract the typed layer is written against,
//! plus two reference backends:
//! - `MemoryStore`: BTreeMap under an RwLock, optional byte quota
//! - `FileStore`: write-through JSON snapshot at a path

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod file;
pub mod memory;

pub use backend::StringStore;
pub use file::FileStore;
pub use memory::MemoryStore;
