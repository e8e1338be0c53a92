//! Persistence for study data
//!
//! Each entity type lives under its own key as one JSON document. Domain
//! storages read the whole collection, change it in memory and write it back.

mod error;
mod kv;
mod store;

pub use error::{Result, StorageError};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use store::{StorageKey, StudyStore};
