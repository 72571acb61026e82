//! Cache manager that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use certitrack_core::config::cache::CacheConfig;
use certitrack_core::error::AppError;
use certitrack_core::result::AppResult;
use certitrack_core::traits::cache::CacheProvider;

/// Cache manager that wraps the configured cache provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct CacheManager {
    inner: Arc<dyn CacheProvider>,
    backend: &'static str,
}

impl CacheManager {
    /// Create a new cache manager from configuration.
    ///
    /// For Redis this connects and pings within `connect_timeout_seconds`;
    /// any failure is returned so the caller can abort startup.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.connect_timeout_seconds);
        let (inner, backend): (Arc<dyn CacheProvider>, &'static str) =
            match config.provider.as_str() {
                #[cfg(feature = "redis-backend")]
                "redis" => {
                    info!("Initializing Redis cache provider");
                    let client = crate::redis::RedisClient::connect(&config.redis, timeout).await?;
                    (Arc::new(crate::redis::RedisCacheProvider::new(client)), "redis")
                }
                #[cfg(feature = "memory")]
                "memory" => {
                    info!("Initializing in-memory cache provider");
                    let provider = crate::memory::MemoryCacheProvider::new(&config.memory);
                    (Arc::new(provider), "memory")
                }
                other => {
                    return Err(AppError::configuration(format!(
                        "Unknown cache provider: '{other}'. Supported: memory, redis"
                    )));
                }
            };

        Ok(Self { inner, backend })
    }

    /// Create a cache manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn CacheProvider>) -> Self {
        Self {
            inner: provider,
            backend: "custom",
        }
    }

    /// Name of the active backend, as reported by the health endpoint.
    pub fn backend(&self) -> &'static str {
        self.backend
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        self.inner.set_if_absent(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
