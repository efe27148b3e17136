//! Sheet validation and preview endpoints

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SheetQuery {
    pub sheet_url: String,
    pub gid: Option<String>,
}

/// Validate a sheet URL by fetching its CSV export.
pub async fn validate_sheet(
    State(state): State<AppState>,
    Query(query): Query<SheetQuery>,
) -> Json<serde_json::Value> {
    match state.sheets.fetch(&query.sheet_url, query.gid.as_deref()).await {
        Ok(data) => Json(json!({
            "valid": true,
            "columns": data.columns,
            "message": "Sheet is accessible",
        })),
        Err(e) => Json(json!({
            "valid": false,
            "error": e.to_string(),
            "message": "Failed to access sheet. Make sure it is shared by link.",
        })),
    }
}

/// Preview the first rows of a sheet.
pub async fn preview_sheet(
    State(state): State<AppState>,
    Query(query): Query<SheetQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let data = state
        .sheets
        .fetch(&query.sheet_url, query.gid.as_deref())
        .await?;

    let preview: Vec<_> = data.rows.iter().take(10).collect();

    Ok(Json(json!({
        "success": true,
        "total_rows": data.rows.len(),
        "preview_rows": preview.len(),
        "data": preview,
        "columns": data.columns,
    })))
}
