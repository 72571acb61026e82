//! Identity attached to the request by the authentication middleware.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use certitrack_entity::user::User;

use crate::error::ApiError;

/// The authenticated account and the access token it presented.
///
/// Inserted into request extensions by `require_auth` / `optional_auth`;
/// extracting it on a route without either middleware yields 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Live account resolved from the token subject.
    pub user: User,
    /// Raw bearer token, needed to revoke it on logout.
    pub token: String,
}

impl std::ops::Deref for AuthUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("User not authenticated"))
    }
}

/// Identity if one was attached, without rejecting anonymous requests.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<AuthUser>().cloned()))
    }
}
