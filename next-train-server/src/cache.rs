//! Caching layer for arrivals responses.
//!
//! Several callers near the same station tend to ask about the same board
//! within seconds of each other. Boards are cached per (stop id, direction)
//! for a short TTL so those requests share one upstream call. Failures are
//! never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::Direction;
use crate::septa::{ArrivalsFeed, FeedArrival, FeedError};

/// Cache key for arrivals boards: (stop id, direction).
type BoardKey = (String, Direction);

/// Cached arrivals for one direction.
type BoardEntry = Arc<Vec<FeedArrival>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries. Zero disables caching.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 1000,
        }
    }
}

/// An arrivals feed with caching.
///
/// Wraps any [`ArrivalsFeed`] and caches successful responses.
pub struct CachedFeed<F> {
    feed: F,
    boards: Option<MokaCache<BoardKey, BoardEntry>>,
}

impl<F: ArrivalsFeed> CachedFeed<F> {
    /// Create a new cached feed.
    pub fn new(feed: F, config: &CacheConfig) -> Self {
        let boards = (!config.ttl.is_zero()).then(|| {
            MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build()
        });

        Self { feed, boards }
    }

    /// Whether responses are being cached at all.
    pub fn is_enabled(&self) -> bool {
        self.boards.is_some()
    }
}

impl<F: ArrivalsFeed> ArrivalsFeed for CachedFeed<F> {
    async fn arrivals(
        &self,
        stop_id: &str,
        direction: Direction,
    ) -> Result<Vec<FeedArrival>, FeedError> {
        let Some(boards) = &self.boards else {
            return self.feed.arrivals(stop_id, direction).await;
        };

        let key = (stop_id.to_string(), direction);

        if let Some(cached) = boards.get(&key).await {
            trace!(stop_id, %direction, "arrivals cache hit");
            return Ok(cached.as_ref().clone());
        }

        let arrivals = self.feed.arrivals(stop_id, direction).await?;
        boards.insert(key, Arc::new(arrivals.clone())).await;

        Ok(arrivals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Feed that counts calls and optionally fails.
    struct CountingFeed {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingFeed {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl ArrivalsFeed for CountingFeed {
        async fn arrivals(
            &self,
            stop_id: &str,
            _direction: Direction,
        ) -> Result<Vec<FeedArrival>, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FeedError::Api {
                    status: 503,
                    message: "down".into(),
                });
            }
            Ok(vec![FeedArrival {
                line: stop_id.to_string(),
                sched_time: "2024-03-15 10:00:00.000000".into(),
                train_id: None,
                destination: None,
                status: None,
                track: None,
            }])
        }
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(30));
        assert_eq!(config.max_capacity, 1000);
    }

    #[test]
    fn zero_ttl_disables_cache() {
        let config = CacheConfig {
            ttl: Duration::ZERO,
            ..CacheConfig::default()
        };
        let cached = CachedFeed::new(CountingFeed::new(false), &config);
        assert!(!cached.is_enabled());
    }

    #[tokio::test]
    async fn second_call_served_from_cache() {
        let cached = CachedFeed::new(CountingFeed::new(false), &CacheConfig::default());

        let first = cached.arrivals("90004", Direction::North).await.unwrap();
        let second = cached.arrivals("90004", Direction::North).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.feed.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn key_includes_direction_and_station() {
        let cached = CachedFeed::new(CountingFeed::new(false), &CacheConfig::default());

        cached.arrivals("90004", Direction::North).await.unwrap();
        cached.arrivals("90004", Direction::South).await.unwrap();
        cached.arrivals("90005", Direction::North).await.unwrap();

        assert_eq!(cached.feed.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn failures_not_cached() {
        let cached = CachedFeed::new(CountingFeed::new(true), &CacheConfig::default());

        assert!(cached.arrivals("90004", Direction::North).await.is_err());
        assert!(cached.arrivals("90004", Direction::North).await.is_err());

        assert_eq!(cached.feed.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn disabled_cache_always_calls_through() {
        let config = CacheConfig {
            ttl: Duration::ZERO,
            ..CacheConfig::default()
        };
        let cached = CachedFeed::new(CountingFeed::new(false), &config);

        cached.arrivals("90004", Direction::North).await.unwrap();
        cached.arrivals("90004", Direction::North).await.unwrap();

        assert_eq!(cached.feed.calls.load(Ordering::SeqCst), 2);
    }
}
