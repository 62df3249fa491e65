//! Handler-level tests using tower::ServiceExt::oneshot.
//!
//! Tests the full Axum router (dispatch + rewriters) against a temporary
//! asset directory, without binding a TCP listener.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::Path;
use streamsim::config::{Config, StreamMode};
use streamsim::server::build_router;
use tempfile::TempDir;
use tower::ServiceExt;

const PLAYLIST: &str = "\
#EXTM3U
#EXT-X-VERSION:3
#EXT-X-TARGETDURATION:6
#EXT-X-PLAYLIST-TYPE:VOD
#EXT-X-MEDIA-SEQUENCE:0
#EXTINF:6.000,
seg0.ts
#EXTINF:6.000,
seg1.ts
#EXTINF:6.000,
seg2.ts
#EXT-X-ENDLIST
";

const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static" mediaPresentationDuration="PT10.0S">
  <Period id="0">
    <SegmentTemplate timescale="1000" media="video_$Number$.m4s">
      <SegmentTimeline>
        <S t="0" d="2000" r="4" />
      </SegmentTimeline>
    </SegmentTemplate>
  </Period>
</MPD>
"#;

/// Build a test config over the given asset root.
fn test_config(mode: StreamMode, root: &Path) -> Config {
    Config {
        mode,
        min_time: 10.0,
        live_window: 30.0,
        add_program_date_time: false,
        add_discontinuities: false,
        serve_all: false,
        port: 0,
        root: root.to_path_buf(),
    }
}

/// Write the standard fixture assets into a fresh temp directory.
fn asset_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("playlist.m3u8"), PLAYLIST).unwrap();
    std::fs::write(dir.path().join("manifest.mpd"), MANIFEST).unwrap();
    std::fs::write(dir.path().join("seg0.ts"), b"segment-bytes").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"not a stream file").unwrap();
    dir
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>, Option<String>) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string());
    let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, body, content_type)
}

// ── Health endpoint ─────────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_200_with_json() {
    let dir = asset_dir();
    let app = build_router(test_config(StreamMode::Event, dir.path()));

    let (status, body, _) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["mode"], "event");
    assert!(json["version"].is_string());
    assert!(json["uptime_seconds"].is_number());
}

// ── VOD pass-through ────────────────────────────────────────────────────────

#[tokio::test]
async fn vod_playlist_is_byte_identical() {
    let dir = asset_dir();
    let app = build_router(test_config(StreamMode::Vod, dir.path()));

    let (status, body, content_type) = get(app, "/playlist.m3u8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PLAYLIST.as_bytes());
    assert_eq!(
        content_type.as_deref(),
        Some("application/vnd.apple.mpegurl")
    );
}

#[tokio::test]
async fn vod_manifest_is_byte_identical() {
    let dir = asset_dir();
    let app = build_router(test_config(StreamMode::Vod, dir.path()));

    let (status, body, content_type) = get(app, "/manifest.mpd").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, MANIFEST.as_bytes());
    assert_eq!(content_type.as_deref(), Some("application/dash+xml"));
}

#[tokio::test]
async fn live_manifest_is_byte_identical() {
    // DASH emulation is event-only; live serves manifests unmodified.
    let dir = asset_dir();
    let app = build_router(test_config(StreamMode::Live, dir.path()));

    let (status, body, _) = get(app, "/manifest.mpd").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, MANIFEST.as_bytes());
}

// ── Event rewriting ─────────────────────────────────────────────────────────

#[tokio::test]
async fn event_playlist_is_truncated() {
    let dir = asset_dir();
    // min_time 10s, elapsed ~0: play position sits inside segment 1.
    let app = build_router(test_config(StreamMode::Event, dir.path()));

    let (status, body, _) = get(app, "/playlist.m3u8").await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("#EXT-X-MEDIA-SEQUENCE:0"));
    assert!(text.contains("#EXT-X-PLAYLIST-TYPE:EVENT"));
    assert!(text.contains("seg0.ts"));
    assert!(!text.contains("seg1.ts"));
    assert!(!text.contains("#EXT-X-ENDLIST"));
}

#[tokio::test]
async fn event_playlist_completes_once_play_time_passes_the_end() {
    let dir = asset_dir();
    let mut config = test_config(StreamMode::Event, dir.path());
    config.min_time = 100.0;
    let app = build_router(config);

    let (_, body, _) = get(app, "/playlist.m3u8").await;
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("seg2.ts"));
    assert!(text.contains("#EXT-X-ENDLIST"));
}

#[tokio::test]
async fn event_manifest_is_rewritten_dynamic_and_truncated() {
    let dir = asset_dir();
    // play position ~10s over 2s segments: 5 occurrences elapsed, r=4 kept.
    let app = build_router(test_config(StreamMode::Event, dir.path()));

    let (status, body, content_type) = get(app, "/manifest.mpd").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/dash+xml"));

    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("type=\"dynamic\""));
    assert!(!text.contains("mediaPresentationDuration"));
    assert!(text.contains(r#"<S t="0" d="2000" r="4" />"#));
}

#[tokio::test]
async fn event_manifest_truncates_partially_elapsed_groups() {
    let dir = asset_dir();
    let mut config = test_config(StreamMode::Event, dir.path());
    // ~7s in: 3 of 5 occurrences elapsed.
    config.min_time = 7.0;
    let app = build_router(config);

    let (_, body, _) = get(app, "/manifest.mpd").await;
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains(r#"<S t="0" d="2000" r="2" />"#));
}

// ── Plain file serving and the extension whitelist ──────────────────────────

#[tokio::test]
async fn segments_are_served_unmodified_in_any_mode() {
    let dir = asset_dir();
    let app = build_router(test_config(StreamMode::Live, dir.path()));

    let (status, body, content_type) = get(app, "/seg0.ts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"segment-bytes");
    assert_eq!(content_type.as_deref(), Some("video/MP2T"));
}

#[tokio::test]
async fn unknown_extension_is_rejected_by_default() {
    let dir = asset_dir();
    let app = build_router(test_config(StreamMode::Vod, dir.path()));

    let (status, body, _) = get(app, "/notes.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn serve_all_relaxes_the_extension_whitelist() {
    let dir = asset_dir();
    let mut config = test_config(StreamMode::Vod, dir.path());
    config.serve_all = true;
    let app = build_router(config);

    let (status, body, _) = get(app, "/notes.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"not a stream file");
}

#[tokio::test]
async fn missing_file_returns_404_with_empty_body() {
    let dir = asset_dir();
    let app = build_router(test_config(StreamMode::Event, dir.path()));

    let (status, body, _) = get(app, "/nonexistent.m3u8").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn path_traversal_returns_404() {
    let dir = asset_dir();
    let app = build_router(test_config(StreamMode::Vod, dir.path()));

    let (status, _, _) = get(app, "/../playlist.m3u8").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
