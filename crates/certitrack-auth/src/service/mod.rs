//! The authentication service contract.
//!
//! Handlers and middleware depend on [`AuthService`] as a trait object so
//! tests can substitute a double; [`JwtAuthService`] is the production
//! implementation.

pub mod jwt_service;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use certitrack_entity::user::User;

use crate::error::AuthError;
use crate::jwt::Claims;

pub use jwt_service::JwtAuthService;

/// Input for a new self-service registration.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    /// Email address, used as the login name.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional contact phone.
    pub phone: Option<String>,
}

/// An authenticated account and its freshly issued token pair.
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// The account, with last-login already updated.
    pub user: User,
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Expiry of the access token.
    pub expires_at: DateTime<Utc>,
}

/// Account registration, credential checks and the token lifecycle.
#[async_trait]
pub trait AuthService: Send + Sync + std::fmt::Debug + 'static {
    /// Create an account with role `user` and sign it in.
    async fn register(&self, input: RegisterInput) -> Result<AuthResult, AuthError>;

    /// Verify credentials of an active account and issue a new pair.
    async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError>;

    /// Exchange a refresh token for a new pair with a distinct refresh token.
    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthResult, AuthError>;

    /// Revoke whichever of the two tokens are supplied.
    async fn revoke_token(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> Result<(), AuthError>;

    /// Sign out by revoking the supplied tokens.
    async fn logout(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> Result<(), AuthError> {
        self.revoke_token(access_token, refresh_token).await
    }

    /// Check an access token, revocation first.
    async fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError>;

    /// Resolve an access token to its live, active account.
    async fn get_user_from_token(&self, token: &str) -> Result<User, AuthError>;

    /// Fetch an active account by id.
    async fn find_active_user(&self, user_id: Uuid) -> Result<User, AuthError>;

    /// Replace the password after verifying the current one.
    async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;
}
