//! Request authentication middleware.
//!
//! `require_auth` resolves the bearer token to a live account and attaches
//! it as [`AuthUser`], rejecting with 401 otherwise. `optional_auth` attaches
//! an identity when it can and never rejects. `require_admin` must run after
//! `require_auth` and rejects non-admin accounts with 403.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, error};

use certitrack_auth::AuthError;
use certitrack_entity::user::User;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Why a bearer token could not be read from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BearerError {
    Missing,
    MalformedScheme,
    EmptyToken,
}

impl From<BearerError> for ApiError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::Missing => ApiError::unauthorized("Authorization header is required"),
            BearerError::MalformedScheme => {
                ApiError::unauthorized("Authorization header must start with 'Bearer '")
            }
            BearerError::EmptyToken => ApiError::unauthorized("Token is required"),
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers.get(AUTHORIZATION).ok_or(BearerError::Missing)?;
    let value = value.to_str().map_err(|_| BearerError::MalformedScheme)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::MalformedScheme)?
        .trim();
    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }
    Ok(token)
}

async fn resolve(state: &AppState, token: &str) -> Result<User, AuthError> {
    state.auth.get_user_from_token(token).await.inspect_err(|e| {
        if e.is_internal() {
            error!(error = %e, "Token check failed; rejecting request");
        } else {
            debug!(reason = %e, "Rejected bearer token");
        }
    })
}

/// Rejects the request with 401 unless it carries a valid access token for
/// an active account.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?.to_string();

    let user = resolve(&state, &token)
        .await
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    request.extensions_mut().insert(AuthUser { user, token });
    Ok(next.run(request).await)
}

/// Attaches an identity when a valid token is present; never rejects.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Ok(token) = bearer_token(request.headers()).map(str::to_string) {
        if let Ok(user) = resolve(&state, &token).await {
            request.extensions_mut().insert(AuthUser { user, token });
        }
    }
    next.run(request).await
}

/// Rejects with 403 unless the attached account is an admin.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("User not authenticated"))?;

    if !auth.user.is_admin() {
        debug!(user_id = %auth.user.id, "Admin gate rejected request");
        return Err(ApiError::forbidden("Admin access required"));
    }

    Ok(next.run(request).await)
}
