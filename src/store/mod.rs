//! Store Module
//!
//! The durable location holding the item collection, behind an async trait
//! so the caches can be driven by any backend.

mod json_file;

#[cfg(test)]
pub(crate) mod scripted;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Item, ItemCollection, NewItem};

pub use json_file::JsonFileStore;

/// Size and modification time of the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreMetadata {
    /// Size of the stored representation in bytes
    pub size_bytes: u64,
    /// Last modification time, if the backend reports one
    pub modified_at: Option<DateTime<Utc>>,
}

/// Backing store for the item collection.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Inspects size and modification time without reading the contents.
    ///
    /// Fails with `StoreUnavailable` when the store cannot be inspected.
    async fn stat_size(&self) -> Result<StoreMetadata>;

    /// Reads and parses the full collection.
    ///
    /// Fails with `LoadError`, including on malformed content.
    async fn load_all(&self) -> Result<ItemCollection>;

    /// Assigns an id to `item`, appends it and persists the collection.
    ///
    /// Callers go through `AdaptiveCache::append` so the read cache is
    /// invalidated before the write is acknowledged.
    async fn append(&self, item: NewItem) -> Result<Item>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}
