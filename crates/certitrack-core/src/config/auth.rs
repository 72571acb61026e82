//! Authentication configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Minimum accepted length of the token signing secret.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Longest accepted access token lifetime (one day).
pub const MAX_ACCESS_TTL_MINUTES: u64 = 24 * 60;

/// Longest accepted refresh token lifetime (one year).
pub const MAX_REFRESH_TTL_HOURS: u64 = 365 * 24;

/// Token signing and credential policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for HMAC token signing.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// `iss` claim written into and required on every token.
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,
    /// `aud` claim written into and required on every token.
    #[serde(default = "default_audience")]
    pub jwt_audience: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token lifetime in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// Revoke the presented refresh token when it is rotated.
    #[serde(default = "default_true")]
    pub single_use_refresh_tokens: bool,
}

impl AuthConfig {
    /// Access token lifetime, capped at [`MAX_ACCESS_TTL_MINUTES`].
    pub fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.jwt_access_ttl_minutes.min(MAX_ACCESS_TTL_MINUTES) * 60)
    }

    /// Refresh token lifetime, capped at [`MAX_REFRESH_TTL_HOURS`].
    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.jwt_refresh_ttl_hours.min(MAX_REFRESH_TTL_HOURS) * 3600)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_issuer: default_issuer(),
            jwt_audience: default_audience(),
            jwt_access_ttl_minutes: default_access_ttl(),
            jwt_refresh_ttl_hours: default_refresh_ttl(),
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            single_use_refresh_tokens: default_true(),
        }
    }
}

fn default_jwt_secret() -> String {
    "development-jwt-secret-key-minimum-32-characters".to_string()
}

fn default_issuer() -> String {
    "certitrack-api".to_string()
}

fn default_audience() -> String {
    "certitrack-client".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    168
}

fn default_password_min() -> usize {
    8
}

fn default_password_max() -> usize {
    72
}

fn default_true() -> bool {
    true
}
