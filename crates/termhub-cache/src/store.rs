//! The cache store contract.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheError;

/// Minimal key-value abstraction over a distributed cache.
///
/// Implementations must be safe for concurrent use by construction; the
/// layers above take no locks. A `ttl` of [`Duration::ZERO`] means **no
/// expiry** - the entry lives until explicitly deleted or overwritten.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// `Ok(None)` when the key is absent or expired - a miss, not a failure.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// JSON (de)serialization helpers over any [`CacheStore`].
///
/// The serialization format is opaque to callers; values are stored as
/// JSON bytes under the hood.
#[async_trait]
pub trait CacheStoreExt: CacheStore {
    async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError>
    where
        T: Serialize + Sync,
    {
        let bytes = serde_json::to_vec(value).map_err(CacheError::Encode)?;
        self.set(key, bytes, ttl).await
    }

    async fn get_json<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned + Send,
    {
        match self.get(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(CacheError::Decode),
            None => Ok(None),
        }
    }
}

impl<S: CacheStore + ?Sized> CacheStoreExt for S {}
