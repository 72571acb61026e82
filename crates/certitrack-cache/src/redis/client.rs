//! Redis connection management.

use std::time::Duration;

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use certitrack_core::config::cache::RedisCacheConfig;
use certitrack_core::error::{AppError, ErrorKind};
use certitrack_core::result::AppResult;

/// Redis client wrapper with connection management.
#[derive(Debug, Clone)]
pub struct RedisClient {
    /// Redis connection manager (reconnecting).
    conn: ConnectionManager,
    /// Key prefix for all keys.
    key_prefix: String,
}

impl RedisClient {
    /// Connect and verify the server answers `PING`.
    ///
    /// Both steps share the `timeout` budget so a dead endpoint cannot stall
    /// startup.
    pub async fn connect(config: &RedisCacheConfig, timeout: Duration) -> AppResult<Self> {
        info!(url = %mask_redis_url(&config.url), "Connecting to Redis");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to create Redis client", e)
        })?;

        let handshake = async {
            let mut conn = ConnectionManager::new(client).await?;
            let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, redis::RedisError>((conn, pong))
        };

        let (conn, pong) = tokio::time::timeout(timeout, handshake)
            .await
            .map_err(|_| {
                AppError::cache(format!(
                    "Timed out connecting to Redis after {}s",
                    timeout.as_secs()
                ))
            })?
            .map_err(|e| {
                AppError::with_source(ErrorKind::Cache, format!("Failed to connect to Redis: {e}"), e)
            })?;

        if pong != "PONG" {
            return Err(AppError::cache(format!("Unexpected PING reply: {pong}")));
        }

        info!("Connected to Redis");
        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// Get a mutable clone of the connection manager.
    pub fn conn_mut(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Build a full key with the configured prefix.
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }
}

/// Mask password in Redis URL for safe logging.
fn mask_redis_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
        None => format!("{scheme}://****@{host}"),
    }
}
