pub mod ai;
pub mod config;
pub mod error;
pub mod logging;
pub mod recipes;
pub mod routes;
pub mod state;

use config::AppConfig;
use error::AppError;
use state::AppState;

/// Load configuration, start logging and serve the HTTP API until shutdown.
pub async fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    logging::init_logging(&config.log_level, logging::is_production())?;

    let app_state = AppState::new(&config.generation);
    tracing::info!(
        generation = ?config.generation,
        remote = app_state.recipes.uses_remote(),
        "Recipe generation configured"
    );

    let app = routes::router(app_state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
