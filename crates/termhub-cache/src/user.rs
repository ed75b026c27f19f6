//! Cache-aside decorator over the user directory.
//!
//! [`CachedUserDirectory`] implements the same capability trait as the
//! accessor it wraps, so call sites are agnostic to whether caching is
//! present. Reads check the cache first and fall through to the wrapped
//! accessor on miss; a fresh fetch is written back with the configured TTL
//! on a best-effort basis.
//!
//! ## Hit sentinel
//!
//! A decoded cache value whose identity field is empty is treated as a
//! miss, not a hit. This conflates a genuine miss with a valid-but-empty
//! record: an entity that legitimately has an empty identifier would
//! bypass the cache on every read.
//!
//! ## Concurrency
//!
//! There is no single-flight guarantee: concurrent misses for the same key
//! may each call the wrapped accessor and redundantly populate the cache.
//! Writes are idempotent (last-write-wins on the same serialized value),
//! so this is a latency cost, not a correctness problem.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use termhub_gateway::{
    CurrentUser, RemoteCallError, RequestContext, StudentInfo, TeacherInfo, UserDirectory,
};

use crate::keys;
use crate::store::{CacheStore, CacheStoreExt};
use crate::CacheError;

/// Identity accessor used as the valid-hit sentinel.
trait CacheIdentity {
    fn cache_id(&self) -> &str;
}

impl CacheIdentity for StudentInfo {
    fn cache_id(&self) -> &str {
        &self.id
    }
}

impl CacheIdentity for TeacherInfo {
    fn cache_id(&self) -> &str {
        &self.id
    }
}

impl CacheIdentity for CurrentUser {
    fn cache_id(&self) -> &str {
        &self.id
    }
}

pub struct CachedUserDirectory {
    inner: Arc<dyn UserDirectory>,
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl CachedUserDirectory {
    pub fn new(inner: Arc<dyn UserDirectory>, store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { inner, store, ttl }
    }

    /// Cache-aside read: hit with a non-empty identity short-circuits;
    /// anything else (miss, decode failure, empty sentinel) falls through
    /// to `fetch`, whose result is written back best-effort.
    async fn cached_fetch<T, Fut>(&self, key: &str, fetch: Fut) -> Result<T, RemoteCallError>
    where
        T: Serialize + DeserializeOwned + CacheIdentity + Send + Sync,
        Fut: Future<Output = Result<T, RemoteCallError>> + Send,
    {
        match self.store.get_json::<T>(key).await {
            Ok(Some(cached)) if !cached.cache_id().is_empty() => {
                tracing::debug!(key = %key, "cache hit");
                return Ok(cached);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "cache read failed, treating as miss");
            }
        }

        let fresh = fetch.await?;

        // Best effort: a write-through failure must never fail the read.
        if let Err(e) = self.store.set_json(key, &fresh, self.ttl).await {
            tracing::warn!(key = %key, error = %e, "cache write-through failed");
        }

        Ok(fresh)
    }

    /// Drops the cached student record; call after any mutation that could
    /// have changed it.
    pub async fn invalidate_student(&self, student_id: &str) -> Result<(), CacheError> {
        self.store.delete(&keys::student(student_id)).await
    }

    pub async fn invalidate_teacher(&self, teacher_id: &str) -> Result<(), CacheError> {
        self.store.delete(&keys::teacher(teacher_id)).await
    }

    pub async fn invalidate_user(&self, user_id: &str) -> Result<(), CacheError> {
        self.store.delete(&keys::user(user_id)).await
    }
}

#[async_trait]
impl UserDirectory for CachedUserDirectory {
    /// Token-derived, not entity-keyed: always passes through uncached.
    async fn current_user(&self, ctx: &RequestContext) -> Result<CurrentUser, RemoteCallError> {
        self.inner.current_user(ctx).await
    }

    async fn student_info(
        &self,
        ctx: &RequestContext,
        student_id: &str,
    ) -> Result<StudentInfo, RemoteCallError> {
        let key = keys::student(student_id);
        self.cached_fetch(&key, self.inner.student_info(ctx, student_id))
            .await
    }

    async fn teacher_info(
        &self,
        ctx: &RequestContext,
        teacher_id: &str,
    ) -> Result<TeacherInfo, RemoteCallError> {
        let key = keys::teacher(teacher_id);
        self.cached_fetch(&key, self.inner.teacher_info(ctx, teacher_id))
            .await
    }

    async fn teacher_by_user_and_org(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        organization_id: &str,
    ) -> Result<TeacherInfo, RemoteCallError> {
        let key = keys::user_org(user_id, organization_id);
        self.cached_fetch(
            &key,
            self.inner.teacher_by_user_and_org(ctx, user_id, organization_id),
        )
        .await
    }

    async fn user_by_teacher(
        &self,
        ctx: &RequestContext,
        teacher_id: &str,
    ) -> Result<CurrentUser, RemoteCallError> {
        let key = keys::user_by_teacher(teacher_id);
        self.cached_fetch(&key, self.inner.user_by_teacher(ctx, teacher_id))
            .await
    }
}
