use clap::Parser;
use std::path::PathBuf;

/// Stream emulation mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamMode {
    /// Serve all documents unmodified
    Vod,
    /// Emulate an in-progress event: playlists/manifests grow over time
    Event,
    /// Emulate a live stream with a sliding segment window (HLS only)
    Live,
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "HLS/DASH test stream server emulating live and event sessions", long_about = None)]
pub struct Args {
    /// VOD test stream (default)
    #[arg(long, conflicts_with_all = ["event", "live"])]
    pub vod: bool,

    /// Emulate an event test stream
    #[arg(long, conflicts_with = "live")]
    pub event: bool,

    /// Emulate a live test stream (HLS only)
    #[arg(long)]
    pub live: bool,

    /// Add EXT-X-PROGRAM-DATE-TIME tags to HLS event playlists (enabled for live)
    #[arg(long = "time")]
    pub time: bool,

    /// Add EXT-X-DISCONTINUITY tags to HLS event playlists
    #[arg(long)]
    pub discontinuity: bool,

    /// HTTP server port number
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Starting event (or live) duration in seconds
    #[arg(long = "mintime", default_value_t = 10.0, allow_negative_numbers = true)]
    pub min_time: f64,

    /// Live window in seconds
    #[arg(long = "livewindow", default_value_t = 30.0, allow_negative_numbers = true)]
    pub live_window: f64,

    /// Enable GET of all files. By default, only files with expected
    /// extensions will be served
    #[arg(long = "all")]
    pub all: bool,

    /// Directory holding the static test stream assets
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

/// Session-wide configuration, constructed once at startup and read-only
/// thereafter. Passed explicitly into each rewriter invocation.
#[derive(Clone, Debug)]
pub struct Config {
    pub mode: StreamMode,
    /// Seconds added to elapsed wall-clock time to form the virtual playback
    /// position
    pub min_time: f64,
    /// Trailing window retained in LIVE mode, in seconds
    pub live_window: f64,
    /// Emit EXT-X-PROGRAM-DATE-TIME tags (forced on in LIVE mode)
    pub add_program_date_time: bool,
    /// Emit EXT-X-DISCONTINUITY tags (HLS only)
    pub add_discontinuities: bool,
    /// Serve files with any extension, not just the known stream types
    pub serve_all: bool,
    pub port: u16,
    pub root: PathBuf,
}

impl Config {
    /// Build the session configuration from parsed command-line arguments.
    pub fn from_args(args: Args) -> Result<Self, Box<dyn std::error::Error>> {
        if args.min_time < 0.0 {
            return Err("--mintime must be >= 0".into());
        }
        if args.live_window < 0.0 {
            return Err("--livewindow must be >= 0".into());
        }

        let mode = if args.live {
            StreamMode::Live
        } else if args.event {
            StreamMode::Event
        } else {
            StreamMode::Vod
        };

        Ok(Config {
            mode,
            min_time: args.min_time,
            live_window: args.live_window,
            // Live playlists always carry program date time tags.
            add_program_date_time: args.time || mode == StreamMode::Live,
            add_discontinuities: args.discontinuity,
            serve_all: args.all,
            port: args.port,
            root: args.root,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
