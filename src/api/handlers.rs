//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::{AdaptiveCache, CacheInfo, StatsCache, StatsSnapshot};
use crate::catalog::CatalogService;
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{
    HealthResponse, Item, ListItemsQuery, NewItem, PageResponse, RefreshResponse,
    StrategyInfoResponse,
};
use crate::store::{ItemStore, JsonFileStore};

/// Application state shared across all handlers.
///
/// Both caches are constructed once at startup and shared by reference.
#[derive(Clone)]
pub struct AppState {
    /// Item queries and writes
    pub catalog: CatalogService,
    /// Derived statistics
    pub stats: Arc<StatsCache>,
}

impl AppState {
    /// Wires the services around an existing item cache.
    pub fn new(items: Arc<AdaptiveCache>, stats_ttl: Duration) -> Self {
        Self {
            catalog: CatalogService::new(items.clone()),
            stats: Arc::new(StatsCache::new(items, stats_ttl)),
        }
    }

    /// Builds the full stack over `store`.
    pub fn with_store(store: Arc<dyn ItemStore>, config: &Config) -> Self {
        let items = Arc::new(AdaptiveCache::with_probe_window(
            store,
            config.probe_window(),
        ));
        Self::new(items, config.stats_ttl())
    }

    /// Creates a new AppState from configuration, backed by the JSON file
    /// at `config.data_path`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_store(Arc::new(JsonFileStore::new(&config.data_path)), config)
    }
}

/// Handler for GET /api/items
///
/// Lists items with optional search and pagination.
pub async fn list_items_handler(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<PageResponse<Item>>> {
    let page = state.catalog.list_items(&query).await?;
    Ok(Json(page))
}

/// Handler for GET /api/items/:id
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>> {
    let id = id
        .parse::<u64>()
        .map_err(|_| CatalogError::InvalidRequest("Invalid ID format".to_string()))?;

    let item = state.catalog.get_item_by_id(id).await?;
    Ok(Json(item))
}

/// Handler for POST /api/items
///
/// Persists a new item and answers 201 with the stored record.
pub async fn create_item_handler(
    State(state): State<AppState>,
    Json(req): Json<NewItem>,
) -> Result<(StatusCode, Json<Item>)> {
    let created = state.catalog.create_item(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /api/items/stats/strategy
pub async fn strategy_handler(State(state): State<AppState>) -> Json<StrategyInfoResponse> {
    Json(StrategyInfoResponse::new(state.catalog.strategy_info().await))
}

/// Handler for GET /api/stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsSnapshot>> {
    let stats = state.stats.get_stats().await?;
    Ok(Json(stats))
}

/// Handler for POST /api/stats/refresh
pub async fn refresh_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>> {
    let stats = state.stats.refresh().await?;
    Ok(Json(RefreshResponse::new(stats)))
}

/// Handler for GET /api/stats/cache-info
pub async fn cache_info_handler(State(state): State<AppState>) -> Json<CacheInfo> {
    Json(state.stats.cache_info().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
