use crate::{clock::SessionClock, config::Config};
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// Both fields are read-only after startup, so concurrent requests share
/// them without locking.
#[derive(Clone)]
pub struct AppState {
    /// Session configuration
    pub config: Arc<Config>,
    /// Startup time base
    pub clock: SessionClock,
}

impl AppState {
    /// Create a new AppState with the given configuration, capturing the
    /// session time base now.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            clock: SessionClock::start(),
        }
    }
}
