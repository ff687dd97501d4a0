//! Strategy Selector
//!
//! Maps the size of the backing store to a caching policy.

use std::time::Duration;

use serde::Serialize;

/// Stores strictly below this size use the small-collection policy (100 KiB).
pub const SMALL_COLLECTION_LIMIT: u64 = 100 * 1024;

/// Stores at or above this size are read directly (1 MiB).
pub const LARGE_COLLECTION_LIMIT: u64 = 1024 * 1024;

/// Cache window for small stores
pub const SMALL_COLLECTION_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache window for medium stores
pub const MEDIUM_COLLECTION_TTL: Duration = Duration::from_secs(30 * 60);

/// How reads are served under a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Serve from memory while the entry is younger than the TTL
    Cached,
    /// Load from the store on every read
    Direct,
}

/// The policy chosen for one probe cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyDescriptor {
    pub mode: CacheMode,
    /// Cache window; `None` in direct mode
    pub ttl: Option<Duration>,
    pub label: &'static str,
    pub description: &'static str,
}

impl StrategyDescriptor {
    pub fn is_cached(&self) -> bool {
        self.mode == CacheMode::Cached
    }
}

// == Select ==
/// Picks the caching strategy for a store of `size_bytes`.
pub fn select(size_bytes: u64) -> StrategyDescriptor {
    if size_bytes < SMALL_COLLECTION_LIMIT {
        StrategyDescriptor {
            mode: CacheMode::Cached,
            ttl: Some(SMALL_COLLECTION_TTL),
            label: "small-collection-cache",
            description: "Small collection optimized with short-term caching",
        }
    } else if size_bytes < LARGE_COLLECTION_LIMIT {
        StrategyDescriptor {
            mode: CacheMode::Cached,
            ttl: Some(MEDIUM_COLLECTION_TTL),
            label: "medium-collection-cache",
            description: "Medium collection with extended caching",
        }
    } else {
        StrategyDescriptor {
            mode: CacheMode::Direct,
            ttl: None,
            label: "large-collection-direct",
            description: "Large collection with direct read (no caching)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_is_small() {
        let strategy = select(0);
        assert_eq!(strategy.mode, CacheMode::Cached);
        assert_eq!(strategy.ttl, Some(SMALL_COLLECTION_TTL));
        assert_eq!(strategy.label, "small-collection-cache");
    }

    #[test]
    fn test_small_medium_boundary() {
        let below = select(SMALL_COLLECTION_LIMIT - 1);
        assert_eq!(below.label, "small-collection-cache");
        assert_eq!(below.ttl, Some(Duration::from_secs(300)));

        let at = select(SMALL_COLLECTION_LIMIT);
        assert_eq!(at.label, "medium-collection-cache");
        assert_eq!(at.ttl, Some(Duration::from_secs(1800)));

        let above = select(SMALL_COLLECTION_LIMIT + 1);
        assert_eq!(above.label, "medium-collection-cache");
    }

    #[test]
    fn test_medium_large_boundary() {
        let below = select(LARGE_COLLECTION_LIMIT - 1);
        assert_eq!(below.mode, CacheMode::Cached);
        assert_eq!(below.label, "medium-collection-cache");

        let at = select(LARGE_COLLECTION_LIMIT);
        assert_eq!(at.mode, CacheMode::Direct);
        assert_eq!(at.ttl, None);
        assert_eq!(at.label, "large-collection-direct");

        let above = select(LARGE_COLLECTION_LIMIT + 1);
        assert!(!above.is_cached());
    }

    #[test]
    fn test_huge_store_is_direct() {
        assert_eq!(select(u64::MAX).mode, CacheMode::Direct);
    }
}
