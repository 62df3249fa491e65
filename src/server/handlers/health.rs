use crate::{config::StreamMode, server::state::AppState};
use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    version: &'static str,
    mode: &'static str,
    uptime_seconds: u64,
}

/// Liveness probe reporting the emulation mode and uptime.
pub async fn health_check(State(state): State<AppState>) -> Json<Health> {
    let mode = match state.config.mode {
        StreamMode::Vod => "vod",
        StreamMode::Event => "event",
        StreamMode::Live => "live",
    };

    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        mode,
        uptime_seconds: state.clock.elapsed().as_secs(),
    })
}
