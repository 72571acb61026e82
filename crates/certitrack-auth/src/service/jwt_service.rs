//! JWT-backed authentication service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use certitrack_cache::RevocationStore;
use certitrack_core::config::AuthConfig;
use certitrack_core::error::{AppError, ErrorKind};
use certitrack_database::AccountRepository;
use certitrack_entity::user::{NewUser, User, UserRole};

use super::{AuthResult, AuthService, RegisterInput};
use crate::error::AuthError;
use crate::jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenType};
use crate::password::{PLACEHOLDER_HASH, PasswordHasher};

/// Upper bound on re-issuing a refresh token that collides with the presented one.
const MAX_ROTATION_ATTEMPTS: usize = 3;

/// Production [`AuthService`] over an account repository and the revocation store.
#[derive(Debug, Clone)]
pub struct JwtAuthService {
    accounts: Arc<dyn AccountRepository>,
    revocations: RevocationStore,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    access_ttl: Duration,
    refresh_ttl: Duration,
    single_use_refresh_tokens: bool,
}

impl JwtAuthService {
    /// Creates the service from auth configuration.
    pub fn new(
        config: &AuthConfig,
        accounts: Arc<dyn AccountRepository>,
        revocations: RevocationStore,
    ) -> Self {
        Self {
            accounts,
            revocations,
            hasher: PasswordHasher::new(),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            access_ttl: config.access_ttl(),
            refresh_ttl: config.refresh_ttl(),
            single_use_refresh_tokens: config.single_use_refresh_tokens,
        }
    }

    /// Argon2 is CPU bound; keep it off the async workers.
    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
    }

    /// Issue a pair for `user`, stamp last-login, and package the result.
    async fn sign_in(&self, mut user: User) -> Result<AuthResult, AuthError> {
        let access = self.encoder.issue_access_token(&user)?;
        let refresh = self.encoder.issue_refresh_token(&user)?;
        self.complete(&mut user).await?;

        Ok(AuthResult {
            user,
            access_token: access.token,
            refresh_token: refresh.token,
            expires_at: access.expires_at,
        })
    }

    async fn complete(&self, user: &mut User) -> Result<(), AuthError> {
        let now = Utc::now();
        self.accounts.update_last_login(user.id, now).await?;
        user.last_login = Some(now);
        user.updated_at = now;
        Ok(())
    }

    /// Issue a refresh token guaranteed to differ from `previous`.
    fn rotate_refresh_token(&self, user: &User, previous: &str) -> Result<IssuedToken, AuthError> {
        for _ in 0..MAX_ROTATION_ATTEMPTS {
            let issued = self.encoder.issue_refresh_token(user)?;
            if issued.token != previous {
                return Ok(issued);
            }
            warn!(user_id = %user.id, "Rotated refresh token collided with the presented one");
        }
        Err(AppError::internal("Could not issue a distinct refresh token").into())
    }

    async fn revoke(&self, token: &str, kind: TokenType) -> Result<(), AuthError> {
        let ttl = match kind {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        self.revocations
            .revoke(token, ttl)
            .await
            .map_err(|source| AuthError::Revocation { kind, source })
    }

    /// Consume a single-use refresh token. Only one concurrent caller wins.
    async fn claim_refresh_token(&self, token: &str) -> Result<(), AuthError> {
        let claimed = self
            .revocations
            .claim(token, self.refresh_ttl)
            .await
            .map_err(|source| AuthError::Revocation {
                kind: TokenType::Refresh,
                source,
            })?;
        if !claimed {
            warn!("Refresh token was already used");
            return Err(AuthError::InvalidToken);
        }
        Ok(())
    }

    async fn ensure_not_revoked(&self, token: &str) -> Result<(), AuthError> {
        if self.revocations.is_revoked(token).await? {
            return Err(AuthError::InvalidToken);
        }
        Ok(())
    }
}

#[async_trait]
impl AuthService for JwtAuthService {
    async fn register(&self, input: RegisterInput) -> Result<AuthResult, AuthError> {
        if self.accounts.email_exists(&input.email).await? {
            return Err(AuthError::UserExists);
        }

        let password_hash = self.hash_password(&input.password).await?;
        let new_user = NewUser {
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            role: UserRole::User,
        };

        // A concurrent registration may win the unique constraint.
        let user = self
            .accounts
            .create_user(&new_user)
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Conflict => AuthError::UserExists,
                _ => AuthError::Internal(e),
            })?;

        info!(user_id = %user.id, "Account registered");
        self.sign_in(user).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let Some(user) = self.accounts.find_active_by_email(email).await? else {
            // Spend the same Argon2 work as a wrong password would.
            self.verify_password(password, PLACEHOLDER_HASH).await?;
            debug!("Login failed: no active account for email");
            return Err(AuthError::UserNotFound);
        };

        if !self.verify_password(password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User logged in");
        self.sign_in(user).await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthResult, AuthError> {
        self.ensure_not_revoked(refresh_token).await?;
        let claims = self.decoder.decode(refresh_token, TokenType::Refresh)?;

        let mut user = self
            .accounts
            .find_active_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if self.single_use_refresh_tokens {
            self.claim_refresh_token(refresh_token).await?;
        }

        let access = self.encoder.issue_access_token(&user)?;
        let refresh = self.rotate_refresh_token(&user, refresh_token)?;
        self.complete(&mut user).await?;

        info!(user_id = %user.id, "Token pair refreshed");
        Ok(AuthResult {
            user,
            access_token: access.token,
            refresh_token: refresh.token,
            expires_at: access.expires_at,
        })
    }

    async fn revoke_token(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> Result<(), AuthError> {
        if access_token.is_none() && refresh_token.is_none() {
            return Err(AuthError::InvalidToken);
        }

        if let Some(token) = access_token {
            self.revoke(token, TokenType::Access).await?;
        }
        if let Some(token) = refresh_token {
            self.revoke(token, TokenType::Refresh).await?;
        }

        info!(
            access = access_token.is_some(),
            refresh = refresh_token.is_some(),
            "Tokens revoked"
        );
        Ok(())
    }

    async fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.ensure_not_revoked(token).await?;
        self.decoder.decode(token, TokenType::Access)
    }

    async fn get_user_from_token(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.validate_access_token(token).await?;
        self.find_active_user(claims.sub).await
    }

    async fn find_active_user(&self, user_id: Uuid) -> Result<User, AuthError> {
        self.accounts
            .find_active_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = self.find_active_user(user_id).await?;

        if !self
            .verify_password(current_password, &user.password_hash)
            .await?
        {
            return Err(AuthError::InvalidCredentials);
        }
        if current_password == new_password {
            return Err(AuthError::PasswordUnchanged);
        }

        let password_hash = self.hash_password(new_password).await?;
        self.accounts.update_password(user.id, &password_hash).await?;

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}
