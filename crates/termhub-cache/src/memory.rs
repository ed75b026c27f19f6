//! In-memory cache store.
//!
//! Per-process backend for tests and single-instance deployments; entries
//! expire lazily on read.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::CacheError;
use crate::store::CacheStore;

#[derive(Debug)]
struct CachedEntry {
    data: Vec<u8>,
    cached_at: Instant,
    ttl: Duration,
}

impl CachedEntry {
    /// A zero TTL never expires.
    fn is_expired(&self) -> bool {
        !self.ttl.is_zero() && self.cached_at.elapsed() > self.ttl
    }
}

#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, CachedEntry>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (possibly expired, not yet evicted) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            CachedEntry {
                data: value,
                cached_at: Instant::now(),
                ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired() {
                return Ok(Some(entry.data.clone()));
            }
            // Evict lazily; drop the shard guard before removing.
            drop(entry);
            self.entries.remove(key);
        }
        Ok(None)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CacheStoreExt;

    #[tokio::test]
    async fn set_get_delete_round_trip() {
        let store = MemoryCacheStore::new();
        store
            .set("k", b"value".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"value".to_vec()));

        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_key_is_a_plain_miss() {
        let store = MemoryCacheStore::new();
        assert!(store.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_entry_reads_as_missing() {
        let store = MemoryCacheStore::new();
        store
            .set("k", b"v".to_vec(), Duration::from_millis(20))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn zero_ttl_means_no_expiry() {
        let store = MemoryCacheStore::new();
        store.set("k", b"v".to_vec(), Duration::ZERO).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn json_helpers_round_trip() {
        let store = MemoryCacheStore::new();
        store
            .set_json("k", &vec!["a", "b"], Duration::from_secs(60))
            .await
            .unwrap();
        let value: Vec<String> = store.get_json("k").await.unwrap().unwrap();
        assert_eq!(value, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn corrupt_payload_is_a_decode_error() {
        let store = MemoryCacheStore::new();
        store
            .set("k", b"not json".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();
        let result = store.get_json::<Vec<String>>("k").await;
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }
}
