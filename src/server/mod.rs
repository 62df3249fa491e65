pub mod handlers;
pub mod path;
pub mod state;

use crate::config::Config;
use axum::{Router, routing::get};
use state::AppState;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the router with all routes and shared state.
///
/// Split out from [`start`] so tests can drive the router without binding a
/// TCP listener.
pub fn build_router(config: Config) -> Router {
    let state = AppState::new(config);

    Router::new()
        .route("/", get(handlers::health::health_check))
        .route("/health", get(handlers::health::health_check))
        .fallback(handlers::stream::serve_asset)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum HTTP server.
pub async fn start(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("0.0.0.0:{}", config.port);
    let app = build_router(config);

    let listener = match tokio::net::TcpListener::bind(addr.as_str()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    info!("Server listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
