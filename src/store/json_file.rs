//! JSON File Store
//!
//! Item collection persisted as a single JSON array on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{ItemStore, StoreMetadata};
use crate::error::{CatalogError, Result};
use crate::models::{Item, ItemCollection, NewItem};

// == JSON File Store ==
/// Item store backed by one JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Location of the JSON array
    path: PathBuf,
    /// Serializes appends; the store assumes a single writer
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store reading and writing `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_items(&self) -> Result<Vec<Item>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CatalogError::LoadError(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            CatalogError::LoadError(format!("malformed JSON in {}: {}", self.path.display(), e))
        })
    }

    async fn write_items(&self, items: &[Item]) -> Result<()> {
        let body = serde_json::to_string_pretty(items)
            .map_err(|e| CatalogError::Internal(format!("cannot serialize items: {}", e)))?;

        // Write next to the target and rename so readers never see a partial file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await.map_err(|e| {
            CatalogError::Internal(format!("cannot write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            CatalogError::Internal(format!("cannot replace {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    async fn stat_size(&self) -> Result<StoreMetadata> {
        let meta = tokio::fs::metadata(&self.path).await.map_err(|e| {
            CatalogError::StoreUnavailable(format!("cannot stat {}: {}", self.path.display(), e))
        })?;

        Ok(StoreMetadata {
            size_bytes: meta.len(),
            modified_at: meta.modified().ok().map(DateTime::<Utc>::from),
        })
    }

    async fn load_all(&self) -> Result<ItemCollection> {
        let items = self.read_items().await?;
        debug!("Loaded {} items from {}", items.len(), self.path.display());
        Ok(Arc::new(items))
    }

    async fn append(&self, item: NewItem) -> Result<Item> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.read_items().await?;
        let id = items.iter().map(|existing| existing.id).max().unwrap_or(0) + 1;
        let created = Item {
            id,
            name: item.name,
            category: item.category,
            price: item.price,
            description: item.description,
        };
        items.push(created.clone());

        self.write_items(&items).await?;
        info!("Persisted item {} to {}", id, self.path.display());
        Ok(created)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
