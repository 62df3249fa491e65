use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, StreamSimError>;

/// Error taxonomy for the test server.
///
/// `NotFound` is the only condition surfaced to the client (as an empty-body
/// 404). Malformed input means the fixture's test assets are broken — the
/// request fails loudly rather than emitting an incorrect manifest.
#[derive(Debug, Error)]
pub enum StreamSimError {
    #[error("file not found")]
    NotFound,

    #[error("malformed HLS playlist: {0}")]
    MalformedPlaylist(String),

    #[error("malformed DASH manifest: {0}")]
    MalformedManifest(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for StreamSimError {
    fn into_response(self) -> Response {
        match self {
            StreamSimError::NotFound => StatusCode::NOT_FOUND.into_response(),
            StreamSimError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound => {
                StatusCode::NOT_FOUND.into_response()
            }
            other => {
                error!("request failed: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
