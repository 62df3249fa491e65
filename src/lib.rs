//! streamsim — emulates live and in-progress ("event") adaptive streaming
//! sessions for test purposes.
//!
//! Static, pre-recorded HLS playlists and DASH manifests are rewritten on
//! every request into the partial view a player would see at a synthetic
//! "current time", derived from wall-clock elapsed time since the server
//! started. Media segments and everything else are served unmodified.

pub mod clock;
pub mod config;
pub mod dash;
pub mod error;
pub mod hls;
pub mod server;
