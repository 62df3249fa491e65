//! Process-wide time base.
//!
//! A single origin timestamp is captured at startup. Every request derives
//! its virtual playback position from the monotonic elapsed time since then,
//! plus the configured minimum offset. The clock is read-only after
//! construction, so concurrent requests need no coordination.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Startup timestamp shared by every request.
#[derive(Clone, Copy, Debug)]
pub struct SessionClock {
    started: Instant,
    started_wall: DateTime<Local>,
}

impl SessionClock {
    /// Capture the origin timestamp. Called once at startup.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            started_wall: Local::now(),
        }
    }

    /// Virtual playback position in seconds: elapsed wall-clock time since
    /// startup plus the configured minimum offset.
    pub fn play_position(&self, min_time: f64) -> f64 {
        self.started.elapsed().as_secs_f64() + min_time
    }

    /// Wall-clock instant the fixture began running, used as the base for
    /// `EXT-X-PROGRAM-DATE-TIME` timestamps.
    pub fn started_wall(&self) -> DateTime<Local> {
        self.started_wall
    }

    /// Time since startup.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_position_includes_min_time() {
        let clock = SessionClock::start();
        let pos = clock.play_position(10.0);
        assert!(pos >= 10.0);
        assert!(pos < 11.0, "fresh clock should be close to min_time");
    }

    #[test]
    fn play_position_is_monotonic() {
        let clock = SessionClock::start();
        let a = clock.play_position(0.0);
        let b = clock.play_position(0.0);
        assert!(b >= a);
    }
}
