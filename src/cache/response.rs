//! Response cache with lazy time-to-live expiry.
//!
//! [`ResponseCache`] short-circuits fetch operations: a fresh entry for a
//! request's [`CacheKey`] is returned without touching the network, retry
//! logic or endpoint selection.
//!
//! # Expiry
//!
//! Entries are never evicted on a timer. An entry is valid while
//! `now - stored_at < ttl`; an expired entry reads as absent but stays in
//! the map until it is overwritten or the cache is cleared. [`len()`]
//! therefore counts expired entries too.
//!
//! Timestamps come from [`tokio::time::Instant`], so a paused tokio clock
//! (`tokio::time::pause`/`advance`) drives expiry in tests.
//!
//! [`len()`]: ResponseCache::len

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use super::CacheKey;
use crate::telemetry;
use crate::types::{NewsItem, NewsResponse};

/// Configuration for the response cache.
///
/// ```rust
/// # use huginn::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new().ttl(Duration::from_secs(60));
/// assert_eq!(config.ttl, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Time-to-live for cached entries. Default: 5 minutes.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Cached payload, one variant per cacheable response shape.
#[derive(Clone, Debug)]
pub enum CachedValue {
    NewsList(NewsResponse),
    NewsItem(NewsItem),
    Categories(Vec<String>),
}

/// Response shapes that can live in the cache.
///
/// Binds each Rust type to its [`CachedValue`] variant so lookups stay
/// typed: asking for a `NewsItem` under a key that holds a list is a miss.
pub trait Cacheable: Clone + Send + Sync + 'static {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: CachedValue) -> Option<Self>;
}

impl Cacheable for NewsResponse {
    fn into_cached(self) -> CachedValue {
        CachedValue::NewsList(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::NewsList(v) => Some(v),
            _ => None,
        }
    }
}

impl Cacheable for NewsItem {
    fn into_cached(self) -> CachedValue {
        CachedValue::NewsItem(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::NewsItem(v) => Some(v),
            _ => None,
        }
    }
}

impl Cacheable for Vec<String> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Categories(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Categories(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    value: CachedValue,
    stored_at: Instant,
}

/// In-memory response cache shared by all fetch operations of a client.
///
/// Backed by an unbounded moka map; expiry is checked on read against the
/// configured TTL rather than enforced by moka.
pub struct ResponseCache {
    entries: moka::sync::Cache<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    /// Create an empty cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: moka::sync::Cache::builder().build(),
            ttl: config.ttl,
        }
    }

    /// Look up a fresh entry.
    ///
    /// Returns `None` if the key was never stored, has expired, or holds a
    /// different response shape. Emits cache hit/miss metrics.
    pub fn get<T: Cacheable>(&self, key: &CacheKey) -> Option<T> {
        let operation = key.operation();
        let hit = self
            .entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .and_then(|entry| T::from_cached(entry.value));
        match hit {
            Some(value) => {
                debug!(key = %key, "cache hit");
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => operation)
                    .increment(1);
                Some(value)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => operation)
                    .increment(1);
                None
            }
        }
    }

    /// Store `value` under `key`, replacing any previous entry and
    /// restarting its TTL.
    pub fn put<T: Cacheable>(&self, key: CacheKey, value: T) {
        self.entries.insert(
            key,
            CacheEntry {
                value: value.into_cached(),
                stored_at: Instant::now(),
            },
        );
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
