//! User registration handler

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::users;
use crate::error::ApiError;
use crate::server::state::AppState;

use super::types::{RegisterRequest, UserResponse};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let pool = state.db()?;

    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }
    if request.password.len() < 6 {
        return Err(ApiError::bad_request(
            "password must be at least 6 characters",
        ));
    }

    if users::get_user_by_email(pool, &request.email).await?.is_some() {
        return Err(ApiError::conflict("email already registered"));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?;
    let user = users::create_user(pool, request.name, request.email, password_hash).await?;

    tracing::info!(user_id = %user.id, "registered new user");

    Ok((StatusCode::CREATED, Json(user.into())))
}
