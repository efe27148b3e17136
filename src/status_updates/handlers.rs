//! Status update endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

use super::db;
use super::types::{CreateStatusRequest, StatusView};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Post a status update. It expires 24 hours after posting.
pub async fn create_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateStatusRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let pool = state.db()?;

    let poster = auth::users::get_user_by_id(pool, user.user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let status = db::create_status(
        pool,
        user.user_id,
        &poster.name,
        poster.phone.as_deref().unwrap_or(""),
        &request.content,
        request.media_url.as_deref(),
        request.media_type,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": status.id,
            "message": "Status created successfully",
            "expires_in_hours": 24,
        })),
    ))
}

/// All active statuses, newest first, with the caller's view state.
pub async fn get_statuses(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<StatusView>>, ApiError> {
    let pool = state.db()?;
    let limit = query.limit.unwrap_or(50).clamp(1, 100);

    let statuses = db::get_active_statuses(pool, limit).await?;
    let views = statuses
        .iter()
        .map(|status| status.view_for(user.user_id))
        .collect();

    Ok(Json(views))
}

/// Get a single status and record the caller as a viewer. Expired
/// statuses return 410.
pub async fn get_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(status_id): Path<Uuid>,
) -> Result<Json<StatusView>, ApiError> {
    let pool = state.db()?;

    let status = db::get_status(pool, status_id)
        .await?
        .ok_or(ApiError::NotFound("status"))?;
    if status.expires_at < chrono::Utc::now() {
        return Err(ApiError::Gone("status"));
    }

    db::add_viewer(pool, status_id, user.user_id).await?;

    let updated = db::get_status(pool, status_id)
        .await?
        .ok_or(ApiError::NotFound("status"))?;

    Ok(Json(updated.view_for(user.user_id)))
}

/// Delete a status. Owner only.
pub async fn delete_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(status_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = state.db()?;

    let removed = db::delete_status(pool, status_id, user.user_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("status"));
    }

    Ok(StatusCode::NO_CONTENT)
}
