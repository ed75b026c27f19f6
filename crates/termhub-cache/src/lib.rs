//! Distributed cache store and cache-aside decorators.
//!
//! ## Architecture
//!
//! - [`CacheStore`] - a minimal key-value abstraction (set-with-TTL,
//!   get, delete) over a distributed cache
//! - [`RedisCacheStore`] - the shared backend for multi-instance
//!   deployments
//! - [`MemoryCacheStore`] - per-process backend for tests and
//!   single-instance deployments
//! - [`CachedUserDirectory`] - a cache-aside decorator implementing the
//!   same [`termhub_gateway::UserDirectory`] capability it wraps
//!
//! ## Cache-aside flow
//!
//! ```text
//! lookup → CacheStore.get → hit? return
//!                         → miss → wrapped accessor → CacheStore.set (best effort)
//! ```
//!
//! Cache writes are never on the correctness-critical path: a write-through
//! failure is logged and swallowed, and the logical read still succeeds.

pub mod keys;
pub mod memory;
pub mod redis;
pub mod store;
pub mod user;

pub use memory::MemoryCacheStore;
pub use self::redis::RedisCacheStore;
pub use store::{CacheStore, CacheStoreExt};
pub use user::CachedUserDirectory;

/// Errors that can occur during cache operations.
///
/// A missing key is *not* an error; stores report it as `Ok(None)` so
/// callers can treat it as a plain miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The backing store failed (connection, pool, command).
    #[error("Cache backend error: {0}")]
    Backend(String),

    /// A value could not be serialized for storage.
    #[error("Cache encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// A stored value could not be deserialized.
    #[error("Cache decode error: {0}")]
    Decode(#[source] serde_json::Error),
}
