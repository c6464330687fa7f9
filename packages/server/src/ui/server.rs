//! Server assembly and execution.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handler::http::{champion_skins, get_rooms, health_check, live_game, metrics_report};
use super::handler::websocket::websocket_handler;
use super::signal::shutdown_signal;
use super::state::AppState;

/// Assemble the full route table. Exposed separately so tests can drive
/// the router on an ephemeral port.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket_handler))
        // HTTP endpoints
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/monitoring/metrics", get(metrics_report))
        .route("/api/champions/skins", get(champion_skins))
        .route("/api/live-game", get(live_game))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The flashtrack gateway server.
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Bind and serve until a shutdown signal arrives.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = build_router(self.state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "flashtrack gateway listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
