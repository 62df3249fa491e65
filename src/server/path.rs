//! Request path validation.

use crate::error::{Result, StreamSimError};
use std::path::{Component, Path, PathBuf};

/// Resolve a request path against the asset root.
///
/// Only plain relative components are accepted; `..`, absolute paths, and
/// empty paths all resolve to `NotFound` so a request can never escape the
/// asset directory.
pub fn resolve(root: &Path, request_path: &str) -> Result<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    if relative.is_empty() {
        return Err(StreamSimError::NotFound);
    }

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(_) => {}
            _ => return Err(StreamSimError::NotFound),
        }
    }

    Ok(root.join(relative))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
