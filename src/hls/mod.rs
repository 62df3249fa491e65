//! HLS media playlist rewriting for event and live emulation.

pub mod line;
pub mod rewriter;

pub use rewriter::rewrite_media_playlist;
