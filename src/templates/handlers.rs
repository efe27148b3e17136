//! Template endpoints

use axum::extract::Path;
use axum::Json;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

use super::catalog::{self, Template};

/// List all templates.
pub async fn get_templates(AuthUser(_user): AuthUser) -> Json<&'static [Template]> {
    Json(catalog::all())
}

/// Get a single template.
pub async fn get_template(
    AuthUser(_user): AuthUser,
    Path(template_id): Path<String>,
) -> Result<Json<&'static Template>, ApiError> {
    catalog::get(&template_id)
        .map(Json)
        .ok_or(ApiError::NotFound("template"))
}
