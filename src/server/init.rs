/**
 * Server Initialization
 *
 * Connects to the database (when configured), runs migrations, wires the
 * simulation engine to the pool and assembles the application state.
 */

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::server::config::Config;
use crate::server::state::AppState;
use crate::sheets::SheetsClient;
use crate::simulation::{SimulationEngine, SimulationPolicy, SqlDeliveryStore};

/// Connect to Postgres and run pending migrations.
///
/// Returns `None` (with a warning) when `DATABASE_URL` is not set or the
/// connection fails, so the server can still come up for health checks.
pub async fn init_database(config: &Config) -> Option<PgPool> {
    let url = match &config.database_url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set, data endpoints will answer 503");
            return None;
        }
    };

    let pool = match PgPoolOptions::new().max_connections(10).connect(url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            return None;
        }
    };

    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::error!(error = %e, "failed to run migrations");
        return None;
    }

    tracing::info!("database connected and migrations applied");
    Some(pool)
}

/// Build the shared application state.
pub fn build_state(db_pool: Option<PgPool>) -> AppState {
    let simulation = db_pool.clone().map(|pool| {
        SimulationEngine::new(
            Arc::new(SqlDeliveryStore::new(pool)),
            SimulationPolicy::default(),
        )
    });

    AppState {
        db_pool,
        simulation,
        sheets: SheetsClient::new(),
    }
}
