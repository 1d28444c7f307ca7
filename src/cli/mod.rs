//! CLI module for FeedSim server functionality.
//!
//! This module provides the `feedsim serve` command implementation.

mod config;
mod handlers;
mod state;

pub use config::{Config, ConfigError, FailuresConfig, Overrides, ServerConfig, SimulatorConfig};
pub use handlers::AppError;
pub use state::AppState;

use crate::stats::new_shared_stats;
use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the router with all mock routes mounted
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/feedsim/stats", get(handlers::get_stats))
        .route("/api/profile", get(handlers::profile))
        .route("/api/posts", get(handlers::posts))
        .route("/api/reels", get(handlers::reels))
        .route("/api/analytics", get(handlers::analytics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the FeedSim server with the given configuration
pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    tracing::info!("Starting FeedSim server on {}", addr);
    tracing::info!(
        "Failure injection: user_not_found={}, upstream_error={}, empty_media={}",
        config.failures.user_not_found_rate,
        config.failures.upstream_error_rate,
        config.failures.empty_media_rate
    );
    tracing::info!("Data endpoints: /api/{{profile,posts,reels,analytics}}?username=...");
    tracing::info!("Stats endpoint: /feedsim/stats");

    let state = Arc::new(AppState::new(&config, new_shared_stats()));
    tracing::info!("Content source: {}", state.source.name());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
