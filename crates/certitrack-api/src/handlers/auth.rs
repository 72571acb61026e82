//! Auth handlers: register, login, refresh, logout, change-password, session.
//!
//! Each handler owns the client-facing wording of its failures. Internal
//! causes are logged and replaced with a generic message.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::error;

use certitrack_auth::AuthError;

use crate::dto::request::{
    ChangePasswordRequest, LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest,
};
use crate::dto::response::{ApiResponse, AuthResponse, MessageResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, MaybeAuthUser, ValidatedJson};
use crate::state::AppState;

/// Log an internal failure and hide it behind `public`.
fn internal(err: &AuthError, public: &str) -> ApiError {
    error!(error = %err, "{public}");
    ApiError::internal(public)
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    let result = state
        .auth
        .register(req.into())
        .await
        .map_err(|e| match e {
            AuthError::UserExists => ApiError::conflict("User with this email already exists"),
            e if e.is_internal() => internal(&e, "Failed to create user"),
            e => ApiError::from(e),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "User registered successfully",
            AuthResponse::from(result),
        )),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let result = state
        .auth
        .login(&req.email, &req.password)
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound | AuthError::InvalidCredentials => {
                ApiError::unauthorized("Invalid email or password")
            }
            e if e.is_internal() => internal(&e, "Login failed"),
            e => ApiError::from(e),
        })?;

    Ok(Json(ApiResponse::new(
        "Login successful",
        AuthResponse::from(result),
    )))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let result = state
        .auth
        .refresh_token(&req.refresh_token)
        .await
        .map_err(|e| match e {
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::InvalidAudience => {
                ApiError::unauthorized("Invalid or expired refresh token")
            }
            AuthError::UserNotFound => ApiError::not_found("User not found"),
            e if e.is_internal() => internal(&e, "Token refresh failed"),
            e => ApiError::from(e),
        })?;

    Ok(Json(ApiResponse::new(
        "Token refreshed successfully",
        AuthResponse::from(result),
    )))
}

/// POST /api/v1/auth/logout
///
/// Revokes the bearer access token and, if the optional body names one, the
/// refresh token as well. An empty body is accepted.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let req: LogoutRequest = if body.iter().all(u8::is_ascii_whitespace) {
        LogoutRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            ApiError::bad_request("Invalid request data")
                .with_details(serde_json::Value::String(e.to_string()))
        })?
    };

    let refresh_token = req.refresh_token.as_deref().filter(|t| !t.is_empty());
    state
        .auth
        .logout(Some(&auth.token), refresh_token)
        .await
        .map_err(|e| match e {
            e if e.is_internal() => internal(&e, "logout failed"),
            e => ApiError::from(e),
        })?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// POST /api/v1/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .auth
        .change_password(auth.user.id, &req.current_password, &req.new_password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => ApiError::unauthorized("Current password is incorrect"),
            e if e.is_internal() => internal(&e, "Password change failed"),
            e => ApiError::from(e),
        })?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// GET /api/v1/auth/session
pub async fn session(MaybeAuthUser(auth): MaybeAuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: auth.is_some(),
        user: auth.map(|a| a.user),
    })
}
