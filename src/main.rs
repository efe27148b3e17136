/**
 * WhatsHub Server Entry Point
 *
 * Starts the dashboard backend: loads the environment, connects to the
 * database, builds the router and serves it, shutting down the delivery
 * simulators gracefully on Ctrl-C.
 */
use whatshub::routes::create_router;
use whatshub::server::config::Config;
use whatshub::server::init::{build_state, init_database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,whatshub=debug".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = Config::from_env();
    let db_pool = init_database(&config).await;
    let state = build_state(db_pool);
    let simulation = state.simulation.clone();

    let app = create_router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await?;

    // Let in-flight simulator runs finish before exiting.
    if let Some(engine) = simulation {
        tracing::info!("waiting for delivery simulations to finish");
        engine.shutdown().await;
    }

    Ok(())
}
