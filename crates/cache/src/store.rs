use crate::error::CacheError;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// A key/value store with per-entry expiry.
///
/// Values are stored as serialized JSON so any response-shaped record or
/// collection can be cached. An entry past its expiry is treated as absent;
/// absence is a normal outcome, not an error. Errors mean the store itself
/// misbehaved (e.g. a remote cache connection failed) and callers are
/// expected to degrade to the database.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the entry at `key` if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, CacheError>;

    /// Stores `value` under `key`, expiring `ttl` from now. Overwrites any
    /// existing entry.
    async fn set(&self, key: &str, value: JsonValue, ttl: Duration) -> Result<(), CacheError>;

    /// True if a non-expired entry is present. A cheap pre-check; `get`
    /// remains the authoritative read.
    async fn exists(&self, key: &str) -> Result<bool, CacheError>;
}

struct Entry {
    value: JsonValue,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// An in-process `CacheStore` backed by a `HashMap`.
///
/// Entries are immutable once written and independently keyed, so a single
/// RwLock is all the coordination concurrent readers and writers need.
/// Expired entries are removed lazily on the read path.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, CacheError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // The entry was expired; drop it so the map does not accumulate
        // dead slots. Re-check under the write lock in case a writer
        // replaced it meanwhile.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.is_expired(now) {
                entries.remove(key);
            } else {
                return Ok(Some(entry.value.clone()));
            }
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: JsonValue, ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key).await?.is_some())
    }
}

/// A `CacheStore` that never holds anything, used when caching is disabled.
/// Every read becomes a miss, so callers always go to the database.
#[derive(Default)]
pub struct NoopCache;

impl NoopCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheStore for NoopCache {
    async fn get(&self, _key: &str) -> Result<Option<JsonValue>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: JsonValue, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }

    async fn exists(&self, _key: &str) -> Result<bool, CacheError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn set_then_get_round_trips_until_ttl_elapses() {
        let cache = MemoryCache::new();
        cache
            .set("k", json!({"v": 1}), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some(json!({"v": 1})));
        assert!(cache.exists("k").await.unwrap());

        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(!cache.exists("k").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn set_overwrites_an_existing_entry_and_its_expiry() {
        let cache = MemoryCache::new();
        cache
            .set("k", json!("old"), Duration::from_secs(10))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(8)).await;
        cache
            .set("k", json!("new"), Duration::from_secs(10))
            .await
            .unwrap();

        // Past the original expiry, but inside the refreshed one.
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(cache.get("k").await.unwrap(), Some(json!("new")));
    }

    #[tokio::test]
    async fn missing_key_is_absence_not_an_error() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("nope").await.unwrap(), None);
        assert!(!cache.exists("nope").await.unwrap());
    }

    #[tokio::test]
    async fn noop_cache_always_misses() {
        let cache = NoopCache::new();
        cache
            .set("k", json!(1), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(!cache.exists("k").await.unwrap());
    }
}
