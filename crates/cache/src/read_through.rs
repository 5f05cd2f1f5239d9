use crate::store::CacheStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// Serves a read through the cache, falling back to `loader` on a miss.
///
/// The policy:
///
/// - On a non-expired hit, the cached value is returned and the loader is
///   never run.
/// - On a miss, the loader runs; a `Some` result is written back under
///   `key` with the fixed `ttl` before being returned.
/// - A `None` loader result is returned as-is and **not** cached, so a
///   "not found" can never be pinned into the cache — the next identical
///   read asks the database again.
/// - Any cache trouble (store failure, an entry that no longer matches the
///   expected shape, a value that fails to serialize) is logged and the
///   read degrades to the loader. The cache can make a request slower,
///   never wrong, and never failed.
///
/// Only the loader's error type escapes; cache errors stay inside.
pub async fn fetch_or_load<T, E, F, Fut>(
    store: &dyn CacheStore,
    key: &str,
    ttl: Duration,
    loader: F,
) -> Result<Option<T>, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    match store.get(key).await {
        Ok(Some(raw)) => match serde_json::from_value::<T>(raw) {
            Ok(value) => {
                tracing::debug!(key, "cache hit");
                return Ok(Some(value));
            }
            Err(e) => {
                // Entry shape drifted (e.g. across a deploy); treat as a miss.
                tracing::warn!(key, error = %e, "discarding undecodable cache entry");
            }
        },
        Ok(None) => {
            tracing::debug!(key, "cache miss");
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "cache unavailable, falling back to database");
        }
    }

    let loaded = loader().await?;

    if let Some(value) = &loaded {
        match serde_json::to_value(value) {
            Ok(raw) => {
                if let Err(e) = store.set(key, raw, ttl).await {
                    tracing::warn!(key, error = %e, "failed to populate cache");
                }
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to serialize value for cache");
            }
        }
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::store::MemoryCache;
    use async_trait::async_trait;
    use serde_json::Value as JsonValue;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(60);

    // A store whose every operation fails, standing in for a dead remote cache.
    struct BrokenCache;

    #[async_trait]
    impl CacheStore for BrokenCache {
        async fn get(&self, _key: &str) -> Result<Option<JsonValue>, CacheError> {
            Err(CacheError::StoreUnavailable("connection refused".into()))
        }

        async fn set(
            &self,
            _key: &str,
            _value: JsonValue,
            _ttl: Duration,
        ) -> Result<(), CacheError> {
            Err(CacheError::StoreUnavailable("connection refused".into()))
        }

        async fn exists(&self, _key: &str) -> Result<bool, CacheError> {
            Err(CacheError::StoreUnavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn second_read_within_ttl_skips_the_loader() {
        let store = MemoryCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value: Option<String> = fetch_or_load(&store, "op::1", TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(Some("hello".to_string()))
            })
            .await
            .unwrap();
            assert_eq!(value.as_deref(), Some("hello"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1, "served from cache once warm");
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_reloads_from_the_loader() {
        let store = MemoryCache::new();
        let calls = AtomicUsize::new(0);

        let load = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(Some(42u32))
        };

        let first: Option<u32> = fetch_or_load(&store, "op::2", TTL, load).await.unwrap();
        assert_eq!(first, Some(42));

        tokio::time::advance(TTL + Duration::from_secs(1)).await;

        let second: Option<u32> = fetch_or_load(&store, "op::2", TTL, load).await.unwrap();
        assert_eq!(second, Some(42));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn none_results_are_never_cached() {
        let store = MemoryCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Option<u32> = fetch_or_load(&store, "op::missing", TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(None)
            })
            .await
            .unwrap();
            assert_eq!(value, None);
        }

        // Every read retried the database; "not found" was never pinned.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(store.get("op::missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn loader_errors_propagate_unchanged() {
        let store = MemoryCache::new();

        let result: Result<Option<u32>, &str> =
            fetch_or_load(&store, "op::err", TTL, || async { Err("db exploded") }).await;

        assert_eq!(result.unwrap_err(), "db exploded");
        assert_eq!(store.get("op::err").await.unwrap(), None);
    }

    #[tokio::test]
    async fn a_broken_store_degrades_to_the_loader() {
        let store = BrokenCache;
        let calls = AtomicUsize::new(0);

        let value: Option<String> = fetch_or_load(&store, "op::3", TTL, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(Some("still correct".to_string()))
        })
        .await
        .unwrap();

        assert_eq!(value.as_deref(), Some("still correct"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn undecodable_entries_are_treated_as_misses() {
        let store = MemoryCache::new();
        store
            .set("op::4", serde_json::json!("not a number"), TTL)
            .await
            .unwrap();

        let value: Option<u32> = fetch_or_load(&store, "op::4", TTL, || async {
            Ok::<_, Infallible>(Some(7))
        })
        .await
        .unwrap();

        assert_eq!(value, Some(7));
    }
}
