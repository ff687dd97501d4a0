//! Adaptive Cache
//!
//! Read path for the item collection. Every read probes the store (through
//! the probe's short window), lets the strategy selector pick a policy from
//! the store size, then serves from memory or from the store accordingly.
//!
//! # Failure handling
//! In cached mode a failed probe or load falls back to the last collection
//! held in memory, however old. Direct mode and an empty slot have nothing
//! to fall back to, so the error reaches the caller. There are no retries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, OnceCell, RwLock};
use tracing::{debug, info, warn};

use super::probe::{StoreProbe, DEFAULT_PROBE_TTL};
use super::strategy::{self, CacheMode, StrategyDescriptor};
use super::CacheEntry;
use crate::error::{CatalogError, Result};
use crate::models::{Item, ItemCollection, NewItem};
use crate::store::ItemStore;

/// One load shared by every reader that missed while it was running.
type Flight = Arc<OnceCell<ItemCollection>>;

/// Introspection snapshot of the read cache.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyInfo {
    /// Label of the strategy chosen on the last read
    pub current_strategy: Option<String>,
    pub description: Option<String>,
    /// Store size from the last successful probe
    pub file_size_bytes: Option<u64>,
    pub has_cache: bool,
    pub cache_age_ms: Option<u64>,
    pub last_refresh: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct CacheSlot {
    /// Last collection loaded under a cached strategy
    entry: Option<CacheEntry<ItemCollection>>,
    /// Strategy chosen on the most recent successful probe
    strategy: Option<StrategyDescriptor>,
}

// == Adaptive Cache ==
pub struct AdaptiveCache {
    store: Arc<dyn ItemStore>,
    probe: StoreProbe,
    slot: RwLock<CacheSlot>,
    in_flight: Mutex<Option<Flight>>,
    /// Bumped by every invalidation; loads started under an older value
    /// never repopulate the slot
    generation: AtomicU64,
}

impl AdaptiveCache {
    // == Constructor ==
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self::with_probe_window(store, DEFAULT_PROBE_TTL)
    }

    /// Creates a cache whose store probe is reused for `window`.
    pub fn with_probe_window(store: Arc<dyn ItemStore>, window: Duration) -> Self {
        Self {
            store,
            probe: StoreProbe::new(window),
            slot: RwLock::new(CacheSlot::default()),
            in_flight: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    // == Read ==
    /// Returns the item collection under the strategy the store size calls for.
    pub async fn read(&self) -> Result<ItemCollection> {
        let probe = match self.probe.probe(self.store.as_ref()).await {
            Ok(probe) => probe,
            Err(err) => return self.fallback(err).await,
        };

        let strategy = strategy::select(probe.size_bytes);
        self.record_strategy(strategy).await;

        match (strategy.mode, strategy.ttl) {
            (CacheMode::Cached, Some(ttl)) => self.read_cached(strategy, ttl).await,
            _ => self.load_shared(strategy).await,
        }
    }

    async fn read_cached(
        &self,
        strategy: StrategyDescriptor,
        ttl: Duration,
    ) -> Result<ItemCollection> {
        {
            let slot = self.slot.read().await;
            if let Some(entry) = slot.entry.as_ref().filter(|entry| entry.is_fresh(ttl)) {
                debug!("Cache hit for strategy: {}", strategy.label);
                return Ok(entry.value.clone());
            }
        }

        match self.load_shared(strategy).await {
            Ok(items) => Ok(items),
            Err(err) => self.fallback(err).await,
        }
    }

    // == Single-Flight Load ==
    /// Joins the load already running, or starts one.
    ///
    /// A failed flight is not shared: each waiting reader then makes its
    /// own attempt.
    async fn load_shared(&self, strategy: StrategyDescriptor) -> Result<ItemCollection> {
        let flight = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight
                .get_or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };
        let generation = self.generation.load(Ordering::Acquire);

        let result = flight
            .get_or_try_init(|| self.load_fresh(strategy, generation))
            .await
            .cloned();

        let mut in_flight = self.in_flight.lock().await;
        if in_flight
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &flight))
        {
            *in_flight = None;
        }

        result
    }

    async fn load_fresh(
        &self,
        strategy: StrategyDescriptor,
        generation: u64,
    ) -> Result<ItemCollection> {
        let items = self.store.load_all().await?;

        if !strategy.is_cached() {
            debug!("Direct read of {} items ({})", items.len(), strategy.label);
            return Ok(items);
        }

        let mut slot = self.slot.write().await;
        if self.generation.load(Ordering::Acquire) == generation {
            slot.entry = Some(CacheEntry::new(items.clone()));
            info!(
                "Cache refreshed for strategy: {} ({} items)",
                strategy.label,
                items.len()
            );
        } else {
            debug!("Load finished after an invalidation, not caching it");
        }
        Ok(items)
    }

    // == Stale Fallback ==
    async fn fallback(&self, err: CatalogError) -> Result<ItemCollection> {
        let slot = self.slot.read().await;
        match (slot.entry.as_ref(), slot.strategy) {
            (Some(entry), Some(strategy)) if strategy.is_cached() => {
                warn!(
                    "Using stale cache ({}s old) due to read error: {}",
                    entry.age().as_secs(),
                    err
                );
                Ok(entry.value.clone())
            }
            _ => Err(err),
        }
    }

    async fn record_strategy(&self, strategy: StrategyDescriptor) {
        let mut slot = self.slot.write().await;
        if slot.strategy.map(|current| current.label) != Some(strategy.label) {
            info!("Selected strategy: {} ({})", strategy.label, strategy.description);
        }
        slot.strategy = Some(strategy);
    }

    // == Invalidate ==
    /// Drops the cached collection and the probe result.
    ///
    /// The next read re-probes, re-selects and loads from the store.
    pub async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.slot.write().await.entry = None;
        *self.in_flight.lock().await = None;
        self.probe.reset().await;
        info!("Item cache invalidated");
    }

    // == Append ==
    /// Persists a new item and invalidates before acknowledging the write.
    pub async fn append(&self, item: NewItem) -> Result<Item> {
        let created = self.store.append(item).await?;
        self.invalidate().await;
        Ok(created)
    }

    /// Counter bumped by every invalidation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    // == Strategy Info ==
    /// Reports the current strategy and slot state without loading anything.
    pub async fn strategy_info(&self) -> StrategyInfo {
        let probe = self.probe.last().await;
        let slot = self.slot.read().await;

        StrategyInfo {
            current_strategy: slot.strategy.map(|s| s.label.to_string()),
            description: slot.strategy.map(|s| s.description.to_string()),
            file_size_bytes: probe.map(|p| p.size_bytes),
            has_cache: slot.entry.is_some(),
            cache_age_ms: slot
                .entry
                .as_ref()
                .map(|entry| entry.age().as_millis() as u64),
            last_refresh: slot.entry.as_ref().map(|entry| entry.loaded_at_wall),
        }
    }
}
