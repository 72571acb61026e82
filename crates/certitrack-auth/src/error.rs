//! Authentication error taxonomy.

use thiserror::Error;

use certitrack_core::error::AppError;

use crate::jwt::TokenType;

/// Outcomes of authentication operations that callers must distinguish.
///
/// Display strings are safe to show to clients; infrastructure detail lives
/// only in the wrapped source of [`AuthError::Revocation`] and
/// [`AuthError::Internal`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration attempted with an email that is already taken.
    #[error("user with this email already exists")]
    UserExists,
    /// No active account matches.
    #[error("user not found")]
    UserNotFound,
    /// The password did not match.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// Malformed, wrongly signed, wrong kind, or revoked token.
    #[error("invalid or expired token")]
    InvalidToken,
    /// Signature is valid but the token is past its expiry.
    #[error("token has expired")]
    TokenExpired,
    /// The token was minted for another audience.
    #[error("invalid token audience")]
    InvalidAudience,
    /// A new password equal to the current one.
    #[error("new password must be different from the current password")]
    PasswordUnchanged,
    /// Writing a revocation entry failed.
    #[error("failed to revoke {kind} token: {source}")]
    Revocation {
        /// Kind of the token that could not be revoked.
        kind: TokenType,
        /// Underlying cache failure.
        source: AppError,
    },
    /// Storage, cache, or hashing failure.
    #[error(transparent)]
    Internal(#[from] AppError),
}

impl AuthError {
    /// Whether the caller should see a generic server error.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Revocation { .. } | Self::Internal(_))
    }
}
