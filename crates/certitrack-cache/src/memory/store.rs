//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::error;

use certitrack_core::config::cache::MemoryCacheConfig;
use certitrack_core::error::AppError;
use certitrack_core::result::AppResult;
use certitrack_core::traits::cache::CacheProvider;

/// A cached value together with the lifetime it was written with.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory cache provider using moka.
///
/// The underlying cache is unbounded so a live entry is only ever removed by
/// its own TTL. `max_capacity` is enforced on writes of new keys, which fail
/// with a cache error once the limit is reached.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, Entry>,
    max_capacity: u64,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder().expire_after(PerEntryTtl).build();

        Self {
            cache,
            max_capacity: config.max_capacity,
        }
    }

    /// Refuse to add a new key when the cache is already full.
    async fn ensure_room_for(&self, key: &str) -> AppResult<()> {
        if self.cache.contains_key(key) || self.cache.entry_count() < self.max_capacity {
            return Ok(());
        }

        // entry_count lags behind; flush pending expirations before refusing.
        self.cache.run_pending_tasks().await;
        if self.cache.entry_count() < self.max_capacity {
            return Ok(());
        }

        error!(
            max_capacity = self.max_capacity,
            "In-memory cache is full, rejecting write"
        );
        Err(AppError::cache(format!(
            "In-memory cache is full ({} entries)",
            self.max_capacity
        )))
    }
}

impl Default for MemoryCacheProvider {
    fn default() -> Self {
        Self::new(&MemoryCacheConfig::default())
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.ensure_room_for(key).await?;
        let entry = Entry {
            value: value.to_string(),
            ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        self.ensure_room_for(key).await?;
        let entry = Entry {
            value: value.to_string(),
            ttl,
        };
        let stored = self
            .cache
            .entry(key.to_string())
            .or_insert_with(async move { entry })
            .await;
        Ok(stored.is_fresh())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.get(key).await.is_some())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
