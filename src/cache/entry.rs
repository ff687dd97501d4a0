//! Cache Entry Module
//!
//! The value-plus-timestamp slot shared by every cache in the crate.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

// == Cache Entry ==
/// A cached value and the moment it was loaded.
///
/// Freshness is judged against a monotonic clock; the wall-clock copy is
/// kept for reporting only.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Monotonic load time, used for TTL decisions
    pub loaded_at: Instant,
    /// Wall-clock load time, used in API responses
    pub loaded_at_wall: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Stamps `value` with the current time.
    pub fn new(value: T) -> Self {
        Self {
            value,
            loaded_at: Instant::now(),
            loaded_at_wall: Utc::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the value was loaded.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.loaded_at)
    }

    // == Is Fresh ==
    /// Checks the entry against a TTL.
    ///
    /// Boundary condition: the entry stops being fresh the instant its age
    /// reaches the TTL, so `(now - loaded_at) < ttl` is the validity rule.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }

    // == Time To Live ==
    /// Remaining lifetime under `ttl`, zero once expired.
    pub fn ttl_remaining(&self, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.age())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_entry_fresh_until_ttl() {
        let entry = CacheEntry::new("value");
        let ttl = Duration::from_secs(60);

        assert!(entry.is_fresh(ttl));
        advance(Duration::from_secs(59)).await;
        assert!(entry.is_fresh(ttl));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(42u32);
        let ttl = Duration::from_secs(60);

        advance(ttl).await;
        assert!(!entry.is_fresh(ttl), "Entry should be expired at boundary");
        assert_eq!(entry.ttl_remaining(ttl), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_never_fresh() {
        let entry = CacheEntry::new(());
        assert!(!entry.is_fresh(Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn test_age_and_remaining() {
        let entry = CacheEntry::new(vec![1, 2, 3]);
        advance(Duration::from_secs(10)).await;

        assert_eq!(entry.age(), Duration::from_secs(10));
        assert_eq!(
            entry.ttl_remaining(Duration::from_secs(30)),
            Duration::from_secs(20)
        );
    }
}
