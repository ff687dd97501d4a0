//! Catalog Service
//!
//! Item queries and writes on top of the adaptive cache.

use std::sync::Arc;

use tracing::info;

use super::query::{paginate, search_items};
use crate::cache::{AdaptiveCache, StrategyInfo};
use crate::error::{CatalogError, Result};
use crate::models::{Item, ItemCollection, ListItemsQuery, NewItem, PageResponse};

// == Catalog Service ==
#[derive(Clone)]
pub struct CatalogService {
    items: Arc<AdaptiveCache>,
}

impl CatalogService {
    pub fn new(items: Arc<AdaptiveCache>) -> Self {
        Self { items }
    }

    /// The whole collection, as served by the adaptive cache.
    pub async fn get_all_items(&self) -> Result<ItemCollection> {
        self.items.read().await
    }

    /// Looks up one item by id.
    pub async fn get_item_by_id(&self, id: u64) -> Result<Item> {
        let items = self.items.read().await?;
        items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound("Item not found".to_string()))
    }

    /// Filters by `searchQuery`, then returns the requested page.
    pub async fn list_items(&self, query: &ListItemsQuery) -> Result<PageResponse<Item>> {
        let (page, per_page) = query.pagination().map_err(CatalogError::InvalidRequest)?;

        let items = self.items.read().await?;
        let matches = search_items(&items, query.search_query.as_deref());
        let slice = paginate(&matches, page, per_page);

        Ok(PageResponse {
            items: slice.items.into_iter().cloned().collect(),
            pagination: slice.pagination,
        })
    }

    /// Validates and persists a new item. The read cache is invalidated
    /// before this returns.
    pub async fn create_item(&self, item: NewItem) -> Result<Item> {
        if let Some(message) = item.validate() {
            return Err(CatalogError::InvalidRequest(message));
        }

        let created = self.items.append(item).await?;
        info!("Created item {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Current read strategy; never loads.
    pub async fn strategy_info(&self) -> StrategyInfo {
        self.items.strategy_info().await
    }
}
