//! Event and live windowing of HLS media playlists.
//!
//! A static, complete media playlist is rewritten into the partial view a
//! player would see at the given virtual playback position. Two stages run
//! over the same in-memory line sequence:
//!
//! 1. **Aggregate scan** — capture the target duration and sum up the total
//!    segment duration.
//! 2. **Windowed reconstruction** — re-emit the playlist line by line,
//!    truncating at the first segment that ends past the playback position
//!    and, in live mode, evicting segments that have fallen out of the
//!    trailing window.
//!
//! Master playlists contain no `#EXTINF` lines, so both stages are the
//! identity for them and they come out unmodified.

use crate::config::{Config, StreamMode};
use crate::error::Result;
use crate::hls::line::{self, LineKind};
use chrono::{DateTime, Local, SecondsFormat, TimeDelta};

/// Aggregate values gathered in the first pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaylistTotals {
    /// Value of the last `#EXT-X-TARGETDURATION` directive, in seconds
    pub target_duration: f64,
    /// Sum of all `#EXTINF` segment durations, in seconds
    pub total_duration: f64,
}

/// Stage 1: scan the playlist for its target and total durations.
pub fn scan_totals(lines: &[&str]) -> Result<PlaylistTotals> {
    let mut totals = PlaylistTotals::default();
    for line in lines {
        match line::classify(line)? {
            LineKind::SegmentInfo(duration) => totals.total_duration += duration,
            LineKind::TargetDuration(duration) => totals.target_duration = duration,
            _ => {}
        }
    }
    Ok(totals)
}

/// Stage 2: rewrite a media playlist as it would appear at `play_position`
/// seconds into an event or live session.
///
/// `origin` is the wall-clock instant the session started; program date time
/// tags are stamped `origin + segment start offset`.
pub fn rewrite_media_playlist(
    content: &str,
    config: &Config,
    play_position: f64,
    origin: DateTime<Local>,
) -> Result<String> {
    let lines: Vec<&str> = content.lines().collect();
    let totals = scan_totals(&lines)?;

    let mut out = String::with_capacity(content.len() + 128);
    // Playable duration remaining after the segment under consideration.
    let mut total_remaining = totals.total_duration;
    // Cumulative duration of segments walked so far, skipped ones included.
    let mut segment_time = 0.0_f64;
    // Count of media URIs seen so far; 0-based index of the next segment.
    let mut sequence_number: u64 = 0;
    let mut first_segment = true;
    let mut skip_segment = false;

    for line in &lines {
        match line::classify(line)? {
            LineKind::SegmentInfo(duration) => {
                // Truncate the playlist once the next segment would end
                // after the current playback position.
                if play_position < segment_time + duration {
                    break;
                }

                total_remaining -= duration;

                // In live emulation, evict segments that fell out of the
                // window — but never shrink the playlist below three target
                // durations of content.
                if config.mode == StreamMode::Live
                    && play_position >= segment_time + duration + config.live_window
                    && total_remaining >= totals.target_duration * 3.0
                {
                    skip_segment = true;
                    segment_time += duration;
                    continue;
                }
                skip_segment = false;

                if first_segment {
                    first_segment = false;
                    out.push_str(&format!("#EXT-X-MEDIA-SEQUENCE:{sequence_number}\n"));

                    if config.add_discontinuities {
                        // Segment 0 carries no discontinuity flag, so
                        // dropping leading segments advances the
                        // discontinuity sequence by one less than the media
                        // sequence.
                        let discontinuity_sequence = sequence_number.saturating_sub(1);
                        out.push_str(&format!(
                            "#EXT-X-DISCONTINUITY-SEQUENCE:{discontinuity_sequence}\n"
                        ));
                    }
                }

                if config.add_discontinuities && sequence_number > 0 {
                    out.push_str("#EXT-X-DISCONTINUITY\n");
                }

                if config.add_program_date_time {
                    let stamp = origin + TimeDelta::milliseconds((segment_time * 1000.0) as i64);
                    out.push_str(&format!(
                        "#EXT-X-PROGRAM-DATE-TIME:{}\n",
                        stamp.to_rfc3339_opts(SecondsFormat::Millis, false)
                    ));
                }

                segment_time += duration;
                out.push_str(line);
                out.push('\n');
            }
            LineKind::PlaylistType => {
                // Only event playlists declare a type; live playlists drop it.
                if config.mode == StreamMode::Event {
                    out.push_str("#EXT-X-PLAYLIST-TYPE:EVENT\n");
                }
            }
            LineKind::MediaSequence => {
                // Dropped: the media sequence is re-synthesized at the first
                // emitted segment, once its index is known.
            }
            LineKind::MediaUri => {
                sequence_number += 1;
                if skip_segment {
                    skip_segment = false;
                    continue;
                }
                out.push_str(line);
                out.push('\n');
            }
            LineKind::TargetDuration(_) | LineKind::Other => {
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
