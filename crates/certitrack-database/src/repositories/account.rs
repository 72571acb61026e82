//! The account store contract consumed by the authentication service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use certitrack_core::result::AppResult;
use certitrack_entity::user::{NewUser, User};

/// Durable storage of user accounts.
///
/// Implementations must be safe for concurrent use; callers hold them as
/// `Arc<dyn AccountRepository>`. Lookups that find nothing return
/// `Ok(None)`; only transport or constraint failures are errors.
#[async_trait]
pub trait AccountRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new account. A duplicate email yields an
    /// `ErrorKind::Conflict` error.
    async fn create_user(&self, data: &NewUser) -> AppResult<User>;

    /// Whether any account, active or not, already uses this email.
    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    /// Find an active account by exact email.
    async fn find_active_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find an active account by id.
    async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Record a successful login or refresh.
    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()>;

    /// Replace the stored password hash.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()>;
}
