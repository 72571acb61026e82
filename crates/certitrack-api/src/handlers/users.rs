//! Account handlers: own profile and the admin lookup.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use certitrack_auth::AuthError;
use certitrack_entity::user::User;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn profile(auth: AuthUser) -> Json<ApiResponse<User>> {
    Json(ApiResponse::new("Profile retrieved successfully", auth.user))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state
        .auth
        .find_active_user(user_id)
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound => ApiError::not_found("User not found"),
            e => ApiError::from(e),
        })?;

    Ok(Json(ApiResponse::new("User retrieved successfully", user)))
}
