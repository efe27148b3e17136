//! Settings endpoints

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

use super::db;
use super::types::{UpdateSettingsRequest, UserSettings};

/// The current user's settings; defaults when nothing has been saved.
pub async fn get_settings(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserSettings>, ApiError> {
    let pool = state.db()?;
    let settings = db::get_settings(pool, user.user_id)
        .await?
        .unwrap_or_default();
    Ok(Json(settings))
}

/// Merge the provided fields into the current settings and store them.
pub async fn update_settings(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<UserSettings>, ApiError> {
    let pool = state.db()?;

    if request.is_empty() {
        return Err(ApiError::bad_request("No settings to update"));
    }

    let current = db::get_settings(pool, user.user_id)
        .await?
        .unwrap_or_default();
    let merged = current.merged_with(&request);
    db::save_settings(pool, user.user_id, &merged).await?;

    Ok(Json(merged))
}
