//! In-memory store with scripted sizes, failures and call counters for unit tests.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use super::{ItemStore, StoreMetadata};
use crate::error::{CatalogError, Result};
use crate::models::{Item, ItemCollection, NewItem};

pub(crate) struct ScriptedStore {
    items: Mutex<Vec<Item>>,
    size_bytes: AtomicU64,
    fail_stat: AtomicBool,
    fail_load: AtomicBool,
    hold_loads: AtomicBool,
    gate: Semaphore,
    hold_stats: AtomicBool,
    stat_gate: Semaphore,
    stat_calls: AtomicUsize,
    load_calls: AtomicUsize,
}

impl ScriptedStore {
    pub(crate) fn new(items: Vec<Item>, size_bytes: u64) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(items),
            size_bytes: AtomicU64::new(size_bytes),
            fail_stat: AtomicBool::new(false),
            fail_load: AtomicBool::new(false),
            hold_loads: AtomicBool::new(false),
            gate: Semaphore::new(0),
            hold_stats: AtomicBool::new(false),
            stat_gate: Semaphore::new(0),
            stat_calls: AtomicUsize::new(0),
            load_calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn set_size(&self, size_bytes: u64) {
        self.size_bytes.store(size_bytes, Ordering::SeqCst);
    }

    pub(crate) fn set_items(&self, items: Vec<Item>) {
        *self.items.lock().unwrap() = items;
    }

    pub(crate) fn fail_stat(&self, fail: bool) {
        self.fail_stat.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    /// Parks every subsequent load until `release_loads` is called.
    pub(crate) fn hold_loads(&self) {
        self.hold_loads.store(true, Ordering::SeqCst);
    }

    pub(crate) fn release_loads(&self) {
        self.hold_loads.store(false, Ordering::SeqCst);
        self.gate.add_permits(64);
    }

    /// Parks every subsequent metadata call until `release_stats` is called.
    pub(crate) fn hold_stats(&self) {
        self.hold_stats.store(true, Ordering::SeqCst);
    }

    pub(crate) fn release_stats(&self) {
        self.hold_stats.store(false, Ordering::SeqCst);
        self.stat_gate.add_permits(64);
    }

    pub(crate) fn stat_calls(&self) -> usize {
        self.stat_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemStore for ScriptedStore {
    async fn stat_size(&self) -> Result<StoreMetadata> {
        self.stat_calls.fetch_add(1, Ordering::SeqCst);
        if self.hold_stats.load(Ordering::SeqCst) {
            let _permit = self.stat_gate.acquire().await.unwrap();
        }
        if self.fail_stat.load(Ordering::SeqCst) {
            return Err(CatalogError::StoreUnavailable("scripted stat failure".into()));
        }
        Ok(StoreMetadata {
            size_bytes: self.size_bytes.load(Ordering::SeqCst),
            modified_at: None,
        })
    }

    async fn load_all(&self) -> Result<ItemCollection> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if self.hold_loads.load(Ordering::SeqCst) {
            let _permit = self.gate.acquire().await.unwrap();
        }
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(CatalogError::LoadError("scripted load failure".into()));
        }
        Ok(Arc::new(self.items.lock().unwrap().clone()))
    }

    async fn append(&self, item: NewItem) -> Result<Item> {
        let mut items = self.items.lock().unwrap();
        let id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let created = Item {
            id,
            name: item.name,
            category: item.category,
            price: item.price,
            description: item.description,
        };
        items.push(created.clone());
        self.size_bytes.fetch_add(100, Ordering::SeqCst);
        Ok(created)
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// Builds `count` items cycling through a few categories, priced 10, 20, 30...
pub(crate) fn sample_items(count: usize) -> Vec<Item> {
    const CATEGORIES: [&str; 3] = ["Electronics", "Furniture", "Books"];
    (1..=count)
        .map(|i| Item {
            id: i as u64,
            name: format!("Item {}", i),
            category: CATEGORIES[i % CATEGORIES.len()].to_string(),
            price: (i * 10) as f64,
            description: None,
        })
        .collect()
}
