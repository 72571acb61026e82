//! In-memory account repository.
//!
//! A mutex-guarded map keyed by account id that honours the same contract
//! as the Postgres repository, including email uniqueness. Used by tests and
//! by local runs that do not need durable storage.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use certitrack_core::error::AppError;
use certitrack_core::result::AppResult;
use certitrack_entity::user::{NewUser, User};

use super::account::AccountRepository;

/// Account store backed by a `HashMap<Uuid, User>`.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryAccountRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account as-is.
    pub fn insert(&self, user: User) -> AppResult<()> {
        self.lock()?.insert(user.id, user);
        Ok(())
    }

    /// Look up an account by id regardless of its active flag.
    pub fn get(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    /// Flip the active flag of an account. Returns `false` if it does not exist.
    pub fn set_active(&self, id: Uuid, active: bool) -> AppResult<bool> {
        let mut users = self.lock()?;
        match users.get_mut(&id) {
            Some(user) => {
                user.is_active = active;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Number of stored accounts.
    pub fn len(&self) -> AppResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Whether the repository holds no accounts.
    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, HashMap<Uuid, User>>> {
        self.users
            .lock()
            .map_err(|_| AppError::internal("Account store lock poisoned"))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_user(&self, data: &NewUser) -> AppResult<User> {
        let mut users = self.lock()?;
        if users.values().any(|u| u.email == data.email) {
            return Err(AppError::conflict("Email already registered"));
        }

        let user = data.clone().into_user(Uuid::new_v4(), Utc::now());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.lock()?.values().any(|u| u.email == email))
    }

    async fn find_active_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .lock()?
            .values()
            .find(|u| u.is_active && u.email == email)
            .cloned())
    }

    async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.lock()?.get(&id).filter(|u| u.is_active).cloned())
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        if let Some(user) = self.lock()?.get_mut(&id) {
            user.last_login = Some(at);
            user.updated_at = at;
        }
        Ok(())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        let mut users = self.lock()?;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }
}
