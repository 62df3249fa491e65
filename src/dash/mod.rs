//! DASH manifest rewriting for event emulation.

pub mod rewriter;

pub use rewriter::rewrite_manifest;
