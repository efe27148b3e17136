//! Current-user handler

use axum::{extract::State, Json};

use crate::auth::users;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

use super::types::UserResponse;

/// Get current user information
pub async fn me(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let pool = state.db()?;

    let user = users::get_user_by_id(pool, auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(user.into()))
}
