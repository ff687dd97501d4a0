//! Statistics Cache
//!
//! Aggregate statistics derived from the item collection, held under their
//! own TTL. Recomputing reads through the adaptive cache, so stats and the
//! raw collection age independently; an invalidation of the item cache
//! does retire the snapshot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::{AdaptiveCache, CacheEntry};
use crate::error::Result;
use crate::models::Item;

/// Default freshness window of a snapshot
pub const DEFAULT_STATS_TTL: Duration = Duration::from_secs(5 * 60);

/// Bucket for items without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Lowest and highest positive price.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Aggregates over the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub count: usize,
    /// Mean price, rounded to 2 decimal places
    pub average_price: f64,
    /// Item count per category
    pub categories: HashMap<String, usize>,
    pub price_range: PriceRange,
    pub computed_at: DateTime<Utc>,
}

/// State of the snapshot slot, as reported by GET /api/stats/cache-info.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInfo {
    pub has_cache: bool,
    pub age_seconds: Option<u64>,
    pub is_expired: bool,
    pub ttl_seconds: u64,
    pub computed_at: Option<DateTime<Utc>>,
}

// == Compute Stats ==
/// Aggregates `items` into a snapshot stamped with the current time.
pub fn compute_stats(items: &[Item]) -> StatsSnapshot {
    let computed_at = Utc::now();
    if items.is_empty() {
        return StatsSnapshot {
            count: 0,
            average_price: 0.0,
            categories: HashMap::new(),
            price_range: PriceRange::default(),
            computed_at,
        };
    }

    let count = items.len();
    let total: f64 = items.iter().map(|item| item.price).sum();
    let mut average_price = round_cents(total / count as f64);

    let mut categories = HashMap::new();
    for item in items {
        let label = match item.category.trim() {
            "" => UNCATEGORIZED,
            category => category,
        };
        *categories.entry(label.to_string()).or_insert(0) += 1;
    }

    let price_range = items
        .iter()
        .map(|item| item.price)
        .filter(|price| *price > 0.0)
        .fold(None, |range: Option<PriceRange>, price| {
            Some(match range {
                None => PriceRange { min: price, max: price },
                Some(r) => PriceRange {
                    min: r.min.min(price),
                    max: r.max.max(price),
                },
            })
        })
        .unwrap_or_default();

    // Cent rounding must not push the average outside a range that covers
    // every item
    if items.iter().all(|item| item.price > 0.0) {
        average_price = average_price.clamp(price_range.min, price_range.max);
    }

    StatsSnapshot {
        count,
        average_price,
        categories,
        price_range,
        computed_at,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug)]
struct StatsSlot {
    entry: CacheEntry<StatsSnapshot>,
    /// Item cache generation the snapshot was computed under
    generation: u64,
}

// == Stats Cache ==
pub struct StatsCache {
    items: Arc<AdaptiveCache>,
    ttl: Duration,
    slot: RwLock<Option<StatsSlot>>,
    /// Serializes recomputation so an expired burst computes once
    refresh_lock: Mutex<()>,
}

impl StatsCache {
    pub fn new(items: Arc<AdaptiveCache>, ttl: Duration) -> Self {
        Self {
            items,
            ttl,
            slot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    // == Get Stats ==
    /// Returns the cached snapshot while it is fresh, recomputing otherwise.
    pub async fn get_stats(&self) -> Result<StatsSnapshot> {
        if let Some(snapshot) = self.fresh_snapshot().await {
            debug!("Stats cache hit");
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;
        // Another caller may have recomputed while we waited.
        if let Some(snapshot) = self.fresh_snapshot().await {
            return Ok(snapshot);
        }
        self.recompute().await
    }

    // == Refresh ==
    /// Recomputes unconditionally. Read failures propagate; stats have no
    /// fallback of their own.
    pub async fn refresh(&self) -> Result<StatsSnapshot> {
        let _guard = self.refresh_lock.lock().await;
        self.recompute().await
    }

    async fn recompute(&self) -> Result<StatsSnapshot> {
        let generation = self.items.generation();
        let items = self.items.read().await?;
        let snapshot = compute_stats(&items);

        *self.slot.write().await = Some(StatsSlot {
            entry: CacheEntry::new(snapshot.clone()),
            generation,
        });
        info!("Stats cache refreshed ({} items)", snapshot.count);
        Ok(snapshot)
    }

    async fn fresh_snapshot(&self) -> Option<StatsSnapshot> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|slot| self.is_current(slot) && slot.entry.is_fresh(self.ttl))
            .map(|slot| slot.entry.value.clone())
    }

    fn is_current(&self, slot: &StatsSlot) -> bool {
        slot.generation == self.items.generation()
    }

    // == Cache Info ==
    /// Describes the snapshot slot. Never triggers a load.
    pub async fn cache_info(&self) -> CacheInfo {
        let slot = self.slot.read().await;
        let current = slot.as_ref().filter(|slot| self.is_current(slot));

        CacheInfo {
            has_cache: current.is_some(),
            age_seconds: current.map(|slot| slot.entry.age().as_secs()),
            is_expired: current.is_some_and(|slot| !slot.entry.is_fresh(self.ttl)),
            ttl_seconds: self.ttl.as_secs(),
            computed_at: current.map(|slot| slot.entry.loaded_at_wall),
        }
    }

    // == Clear ==
    pub async fn clear(&self) {
        *self.slot.write().await = None;
        info!("Stats cache cleared");
    }
}
