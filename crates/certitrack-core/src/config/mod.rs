//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `CERTITRACK__*` environment variables. Each sub-module
//! represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod cache;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::cache::CacheConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (`config/default.toml`, the environment overlay, then env vars).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Revocation cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Token and credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load and validate configuration.
    ///
    /// Merges `config/default.toml`, `config/{env}.toml` and environment
    /// variables such as `CERTITRACK__AUTH__JWT_SECRET`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CERTITRACK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the auth subsystem cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.len() < auth::MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {} characters long",
                auth::MIN_SECRET_LENGTH
            )));
        }
        if self.auth.jwt_issuer.is_empty() || self.auth.jwt_audience.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_issuer and auth.jwt_audience must not be empty",
            ));
        }
        if self.auth.jwt_access_ttl_minutes == 0 || self.auth.jwt_refresh_ttl_hours == 0 {
            return Err(AppError::configuration("token lifetimes must be positive"));
        }
        if self.auth.jwt_access_ttl_minutes > auth::MAX_ACCESS_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_access_ttl_minutes must be at most {}",
                auth::MAX_ACCESS_TTL_MINUTES
            )));
        }
        if self.auth.jwt_refresh_ttl_hours > auth::MAX_REFRESH_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "auth.jwt_refresh_ttl_hours must be at most {}",
                auth::MAX_REFRESH_TTL_HOURS
            )));
        }
        if !matches!(self.cache.provider.as_str(), "redis" | "memory") {
            return Err(AppError::configuration(format!(
                "Unknown cache provider: '{}'. Supported: memory, redis",
                self.cache.provider
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.jwt_issuer, "certitrack-api");
        assert_eq!(config.auth.jwt_audience, "certitrack-client");
        assert_eq!(config.auth.access_ttl().as_secs(), 15 * 60);
        assert_eq!(config.auth.refresh_ttl().as_secs(), 7 * 24 * 3600);
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "too-short".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_token_lifetimes_are_bounded() {
        let mut config = AppConfig::default();
        config.auth.jwt_access_ttl_minutes = auth::MAX_ACCESS_TTL_MINUTES;
        config.auth.jwt_refresh_ttl_hours = auth::MAX_REFRESH_TTL_HOURS;
        assert!(config.validate().is_ok());

        config.auth.jwt_access_ttl_minutes = u64::MAX;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
        assert_eq!(config.auth.access_ttl().as_secs(), auth::MAX_ACCESS_TTL_MINUTES * 60);

        config.auth.jwt_access_ttl_minutes = 15;
        config.auth.jwt_refresh_ttl_hours = auth::MAX_REFRESH_TTL_HOURS + 1;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
        assert_eq!(config.auth.refresh_ttl().as_secs(), auth::MAX_REFRESH_TTL_HOURS * 3600);
    }

    #[test]
    fn test_unknown_cache_provider_rejected() {
        let mut config = AppConfig::default();
        config.cache.provider = "memcached".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sections_default_when_missing() {
        let config: AppConfig = serde_json::from_str(r#"{"auth": {"jwt_audience": "other"}}"#)
            .expect("partial config deserializes");
        assert_eq!(config.auth.jwt_audience, "other");
        assert_eq!(config.auth.jwt_issuer, "certitrack-api");
        assert_eq!(config.cache.provider, "redis");
    }
}
