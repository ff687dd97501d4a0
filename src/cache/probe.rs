//! Store Probe
//!
//! Inspects the backing store's size, reusing the answer for a short window
//! so bursts of reads do not hammer the filesystem with metadata calls.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::debug;

use super::CacheEntry;
use crate::error::Result;
use crate::store::{ItemStore, StoreMetadata};

/// Default probe window
pub const DEFAULT_PROBE_TTL: Duration = Duration::from_secs(60);

/// Outcome of one store inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub size_bytes: u64,
    pub modified_at: Option<DateTime<Utc>>,
    pub probed_at: Instant,
}

// == Store Probe ==
#[derive(Debug)]
pub struct StoreProbe {
    /// How long a successful probe is reused
    window: Duration,
    /// Last successful probe; never locked across I/O
    last: RwLock<Option<CacheEntry<StoreMetadata>>>,
    /// Held across the metadata call so concurrent callers share one probe
    probing: Mutex<()>,
}

impl StoreProbe {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: RwLock::new(None),
            probing: Mutex::new(()),
        }
    }

    /// Returns the store's size, probing only when the window has elapsed.
    ///
    /// A failed probe leaves the previous result in place and propagates
    /// `StoreUnavailable`.
    pub async fn probe(&self, store: &dyn ItemStore) -> Result<ProbeResult> {
        if let Some(result) = self.fresh().await {
            return Ok(result);
        }

        let _probing = self.probing.lock().await;
        if let Some(result) = self.fresh().await {
            return Ok(result);
        }

        let metadata = store.stat_size().await?;
        debug!(
            "Probed {}: {} bytes",
            store.describe(),
            metadata.size_bytes
        );
        let entry = CacheEntry::new(metadata);
        let result = to_result(&entry);
        *self.last.write().await = Some(entry);
        Ok(result)
    }

    async fn fresh(&self) -> Option<ProbeResult> {
        self.last
            .read()
            .await
            .as_ref()
            .filter(|entry| entry.is_fresh(self.window))
            .map(to_result)
    }

    /// Last successful probe, without touching the store.
    pub async fn last(&self) -> Option<ProbeResult> {
        self.last.read().await.as_ref().map(to_result)
    }

    /// Forgets the last probe so the next call inspects the store.
    ///
    /// Waits out a probe already in progress so its result cannot land
    /// after the reset.
    pub async fn reset(&self) {
        let _probing = self.probing.lock().await;
        *self.last.write().await = None;
    }
}

impl Default for StoreProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TTL)
    }
}

fn to_result(entry: &CacheEntry<StoreMetadata>) -> ProbeResult {
    ProbeResult {
        size_bytes: entry.value.size_bytes,
        modified_at: entry.value.modified_at,
        probed_at: entry.loaded_at,
    }
}
