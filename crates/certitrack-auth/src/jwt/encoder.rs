//! Token signing.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use certitrack_core::config::AuthConfig;
use certitrack_core::error::AppError;
use certitrack_entity::user::User;

use super::claims::{Claims, TokenType};

/// A freshly signed token and the instant it stops validating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// Value of the `exp` claim.
    pub expires_at: DateTime<Utc>,
}

/// The config accessors cap lifetimes well inside chrono's range.
fn lifetime(ttl: std::time::Duration) -> Duration {
    Duration::from_std(ttl).unwrap_or_else(|_| Duration::zero())
}

/// Creates HS256-signed access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            access_ttl: lifetime(config.access_ttl()),
            refresh_ttl: lifetime(config.refresh_ttl()),
        }
    }

    /// Issues a short-lived access token for `user`.
    pub fn issue_access_token(&self, user: &User) -> Result<IssuedToken, AppError> {
        self.issue(user, TokenType::Access, self.access_ttl)
    }

    /// Issues a long-lived refresh token for `user`.
    pub fn issue_refresh_token(&self, user: &User) -> Result<IssuedToken, AppError> {
        self.issue(user, TokenType::Refresh, self.refresh_ttl)
    }

    /// Builds claims for `user` valid from `now` for `ttl`.
    pub fn claims_for(
        &self,
        user: &User,
        token_type: TokenType,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Claims {
        let issued_at = now.timestamp();
        Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            token_type,
            jti: Uuid::new_v4(),
            iss: self.issuer.clone(),
            aud: vec![self.audience.clone()],
            iat: issued_at,
            nbf: issued_at,
            exp: (now + ttl).timestamp(),
        }
    }

    /// Signs arbitrary claims with the configured secret.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            AppError::internal(format!("Failed to encode {} token: {e}", claims.token_type))
        })
    }

    fn issue(
        &self,
        user: &User,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<IssuedToken, AppError> {
        let claims = self.claims_for(user, token_type, Utc::now(), ttl);
        let token = self.sign(&claims)?;
        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
        })
    }
}
