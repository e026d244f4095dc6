//! TTL cache implementation.

use derive_getters::Getters;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cache entry with value and expiration.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    value: JsonValue,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    /// Check if this entry is expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.created_at.elapsed())
    }
}

/// In-memory cache with per-entry TTL.
///
/// Keyed by opaque string; entries are overwritten unconditionally on insert
/// and evicted lazily when read after their TTL. There is no capacity bound
/// and no background sweep; `cleanup_expired` is available for callers that
/// want to reclaim memory explicitly.
///
/// Instances are constructed explicitly and passed to the components that
/// need them rather than living in process-wide state. A cached
/// `Value::Null` is a hit, distinct from a miss, which lets callers store
/// sentinel markers for negative results.
///
/// # Example
///
/// ```
/// use psephos_cache::TtlCache;
/// use serde_json::json;
/// use std::time::Duration;
///
/// let mut cache = TtlCache::new();
/// cache.insert("election_info_3", json!({"name": "General"}), Duration::from_secs(120));
///
/// if let Some(entry) = cache.get("election_info_3") {
///     println!("Cached: {:?}", entry.value());
/// }
/// ```
#[derive(Debug, Default)]
pub struct TtlCache {
    entries: HashMap<String, CacheEntry>,
}

impl TtlCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert a value, unconditionally overwriting any prior entry.
    #[tracing::instrument(skip(self, value), fields(cache_size = self.entries.len()))]
    pub fn insert(&mut self, key: &str, value: JsonValue, ttl: Duration) {
        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
            ttl,
        };
        tracing::debug!(ttl = ?ttl, "Inserted entry into cache");
        self.entries.insert(key.to_string(), entry);
    }

    /// Get a cached entry.
    ///
    /// Returns None if the entry doesn't exist or has expired. Expired
    /// entries are removed on the way out.
    #[tracing::instrument(skip(self), fields(cache_size = self.entries.len()))]
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        let entry = self.entries.get(key)?;
        if entry.is_expired() {
            tracing::debug!("Cache entry expired, removing");
            self.entries.remove(key);
            return None;
        }
        let entry = self.entries.get(key)?;
        tracing::debug!(time_remaining = ?entry.time_remaining(), "Cache hit");
        Some(entry)
    }

    /// Serialize and insert a typed value.
    ///
    /// Values that fail to serialize are dropped rather than cached; the
    /// next read simply misses.
    pub fn insert_json<T: Serialize>(&mut self, key: &str, value: &T, ttl: Duration) {
        match serde_json::to_value(value) {
            Ok(json) => self.insert(key, json, ttl),
            Err(e) => tracing::warn!(key, error = %e, "Failed to serialize cache value"),
        }
    }

    /// Get and deserialize a typed value.
    ///
    /// A cached entry that fails to deserialize is treated as a miss.
    pub fn get_json<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let value = self.get(key)?.value().clone();
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to deserialize cache value");
                None
            }
        }
    }

    /// Explicitly invalidate one key.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        self.entries.remove(key)
    }

    /// Remove expired entries from cache.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(removed, remaining = self.entries.len(), "Cleaned up expired cache entries");
        }
        removed
    }

    /// Clear all cache entries.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Get number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
