//! Tower/Axum middleware.

pub mod auth;
pub mod cors;
pub mod logging;

pub use auth::{optional_auth, require_admin, require_auth};
