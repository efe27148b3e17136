/**
 * Router Configuration
 *
 * Combines the public and protected route groups into a single Axum
 * router, layered with request tracing and permissive CORS for the
 * dashboard frontend.
 */
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::api_routes::{protected_routes, public_routes};
use crate::server::state::AppState;

async fn root() -> Json<Value> {
    Json(json!({
        "name": "whatshub",
        "status": "running",
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "database": state.db_pool.is_some(),
    }))
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
