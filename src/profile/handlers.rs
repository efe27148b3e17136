//! Business profile endpoints

use axum::extract::State;
use axum::Json;

use crate::auth;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

use super::db;
use super::types::{ProfileResponse, UpdateProfileRequest};

/// The current user's profile.
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let pool = state.db()?;
    let profile = auth::users::get_user_by_id(pool, user.user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(profile.into()))
}

/// Partially update the current user's profile.
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let pool = state.db()?;

    if request.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let updated = db::update_profile(pool, user.user_id, &request)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(updated.into()))
}
