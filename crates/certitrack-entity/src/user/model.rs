//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique account identifier.
    pub id: Uuid,
    /// Email address, unique and compared exactly as stored.
    pub email: String,
    /// Argon2id PHC string. Never serialized outward.
    #[serde(default, skip_serializing)]
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Privilege level.
    pub role: UserRole,
    /// Inactive accounts cannot log in or refresh.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login or refresh.
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Check if this account has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Assigned role.
    pub role: UserRole,
}

impl NewUser {
    /// Materialize the account row as the store would, active and never logged in.
    pub fn into_user(self, id: Uuid, now: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            role: self.role,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login: None,
        }
    }
}
