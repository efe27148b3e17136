//! Login handler

use axum::{extract::State, Json};

use crate::auth::{tokens, users};
use crate::error::ApiError;
use crate::server::state::AppState;

use super::types::{LoginRequest, TokenResponse};

/// Login and get access token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let pool = state.db()?;

    let user = users::get_user_by_email(pool, &request.email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let valid = bcrypt::verify(&request.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized);
    }

    let access_token = tokens::create_token(user.id, user.email)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}
