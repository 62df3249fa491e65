//! Extension-based dispatch between the rewriters and plain file serving.

use crate::{
    config::StreamMode,
    dash, hls,
    error::{Result, StreamSimError},
    server::{path, state::AppState},
};
use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::path::Path;
use tracing::debug;

const HLS_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";
const DASH_CONTENT_TYPE: &str = "application/dash+xml";

/// Serve one test stream asset.
///
/// Playlists and manifests are rewritten according to the stream mode;
/// media segments are served unmodified; unknown extensions are rejected
/// unless `--all` was given. Every view is recomputed from the on-disk
/// document — nothing is cached between requests.
pub async fn serve_asset(State(state): State<AppState>, uri: Uri) -> Result<Response> {
    let asset = path::resolve(&state.config.root, uri.path())?;
    let extension = asset
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    debug!("GET {} -> {}", uri.path(), asset.display());

    match extension.as_str() {
        // HLS playlist
        "m3u8" => match state.config.mode {
            StreamMode::Vod => serve_file(&asset, HLS_CONTENT_TYPE).await,
            StreamMode::Event | StreamMode::Live => serve_hls_playlist(&state, &asset).await,
        },
        // DASH manifest
        "mpd" => match state.config.mode {
            StreamMode::Event => serve_dash_manifest(&state, &asset).await,
            StreamMode::Vod | StreamMode::Live => serve_file(&asset, DASH_CONTENT_TYPE).await,
        },
        // fMP4 segment
        "m4s" => serve_file(&asset, "video/iso.segment").await,
        // MPEG TS segment
        "ts" => serve_file(&asset, "video/MP2T").await,
        // MP3 audio
        "mp3" => serve_file(&asset, "audio/mpeg").await,
        _ if state.config.serve_all => serve_file(&asset, "application/octet-stream").await,
        _ => Err(StreamSimError::NotFound),
    }
}

/// Rewrite an HLS media playlist to its current event/live view.
async fn serve_hls_playlist(state: &AppState, asset: &Path) -> Result<Response> {
    let content = read_asset_string(asset).await?;
    let play_position = state.clock.play_position(state.config.min_time);

    let rewritten = hls::rewrite_media_playlist(
        &content,
        &state.config,
        play_position,
        state.clock.started_wall(),
    )?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, HLS_CONTENT_TYPE)],
        rewritten,
    )
        .into_response())
}

/// Rewrite a DASH manifest to its current event view.
async fn serve_dash_manifest(state: &AppState, asset: &Path) -> Result<Response> {
    let content = read_asset_string(asset).await?;
    let play_position = state.clock.play_position(state.config.min_time);

    let rewritten = dash::rewrite_manifest(&content, play_position)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, DASH_CONTENT_TYPE)],
        rewritten,
    )
        .into_response())
}

/// Serve a file unmodified.
async fn serve_file(asset: &Path, content_type: &str) -> Result<Response> {
    let bytes = match tokio::fs::read(asset).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StreamSimError::NotFound);
        }
        Err(e) => return Err(e.into()),
    };

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type.to_string())],
        Body::from(bytes),
    )
        .into_response())
}

async fn read_asset_string(asset: &Path) -> Result<String> {
    match tokio::fs::read_to_string(asset).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StreamSimError::NotFound),
        Err(e) => Err(e.into()),
    }
}
