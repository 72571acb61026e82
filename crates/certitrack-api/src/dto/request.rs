//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

use certitrack_auth::RegisterInput;

use crate::validation::{NamedRules, STRONG_PASSWORD};

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub password: String,
    /// Given name.
    #[serde(alias = "first_name")]
    #[validate(length(min = 2, max = 50, message = "First name must be 2 to 50 characters"))]
    pub first_name: String,
    /// Family name.
    #[serde(alias = "last_name")]
    #[validate(length(min = 2, max = 50, message = "Last name must be 2 to 50 characters"))]
    pub last_name: String,
    /// Optional phone.
    #[serde(default)]
    #[validate(length(min = 8, max = 20, message = "Phone must be 8 to 20 characters"))]
    pub phone: Option<String>,
}

impl NamedRules for RegisterRequest {
    fn named_rules(&self) -> Vec<(&'static str, &'static str, &str)> {
        vec![("password", STRONG_PASSWORD, &self.password)]
    }
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone.filter(|p| !p.is_empty()),
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub password: String,
}

impl NamedRules for LoginRequest {}

/// Token refresh request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[serde(alias = "refreshToken")]
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

impl NamedRules for RefreshRequest {}

/// Optional logout request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to revoke alongside the bearer access token.
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
}

/// Password change request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub new_password: String,
}

impl NamedRules for ChangePasswordRequest {
    fn named_rules(&self) -> Vec<(&'static str, &'static str, &str)> {
        vec![("newPassword", STRONG_PASSWORD, &self.new_password)]
    }
}
