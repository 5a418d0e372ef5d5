//! Inbound HTTP surface for browser front ends.

pub mod handlers;


use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{clash::http::UpstreamClient, config::Config, Result};

/// Route serving player lookups.
pub const PLAYER_ROUTE: &str = "/api/player";
pub const HEALTH_ROUTE: &str = "/health";

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(client: UpstreamClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_ROUTE, get(handlers::health_check))
        .route(PLAYER_ROUTE, get(handlers::get_player))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn serve(config: &Config, client: UpstreamClient) -> Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    tracing::info!("Upstream API: {}", client.base_url());

    let app = build_router(AppState::new(client));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
