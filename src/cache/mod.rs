//! Cache Module
//!
//! Size-aware read cache over the item store, plus the statistics cache
//! derived from it.

mod adaptive;
mod entry;
mod probe;
mod stats;
pub mod strategy;


// Re-export public types
pub use adaptive::{AdaptiveCache, StrategyInfo};
pub use entry::CacheEntry;
pub use probe::{ProbeResult, StoreProbe, DEFAULT_PROBE_TTL};
pub use stats::{
    compute_stats, CacheInfo, PriceRange, StatsCache, StatsSnapshot, DEFAULT_STATS_TTL,
    UNCATEGORIZED,
};
pub use strategy::{select, CacheMode, StrategyDescriptor};
