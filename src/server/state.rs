/**
 * Application State Management
 *
 * This module defines the application state structure shared by every
 * handler. The database pool is optional: when `DATABASE_URL` is not
 * configured the server still starts, and data endpoints answer 503.
 * The simulation engine is only present when the database is, since the
 * simulators have nothing to write to without it.
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::sheets::SheetsClient;
use crate::simulation::SimulationEngine;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool; `None` if `DATABASE_URL` is not set.
    pub db_pool: Option<PgPool>,

    /// Delivery simulation engine; `None` when the database is absent.
    pub simulation: Option<SimulationEngine>,

    /// Client for fetching published-spreadsheet CSV exports.
    pub sheets: SheetsClient,
}

impl AppState {
    /// Get the database pool, or fail with 503 when not configured.
    pub fn db(&self) -> Result<&PgPool, ApiError> {
        self.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)
    }
}

/// Allows handlers to extract the optional pool directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
