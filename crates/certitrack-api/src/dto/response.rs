//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use certitrack_auth::AuthResult;
use certitrack_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Human-readable outcome.
    pub message: String,
    /// Response payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` with a message.
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Message-only response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Build from any string-like value.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Account plus a freshly issued token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated account.
    pub user: User,
    /// Access token.
    #[serde(rename = "access-token")]
    pub access_token: String,
    /// Refresh token.
    #[serde(rename = "refresh-token")]
    pub refresh_token: String,
    /// Access token expiry.
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            user: result.user,
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            expires_at: result.expires_at,
        }
    }
}

/// Answer of the session probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Whether a valid access token accompanied the request.
    pub authenticated: bool,
    /// The resolved account, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
    /// Revocation cache state.
    pub cache: String,
}
