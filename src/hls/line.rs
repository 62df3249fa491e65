//! Line classification for HLS media playlists.
//!
//! The rewriter only cares about a handful of line shapes; everything else
//! passes through verbatim. Classification is done with explicit prefix
//! matching rather than regexes so each kind is independently testable.

use crate::error::{Result, StreamSimError};

/// The kinds of playlist line the rewriter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind {
    /// `#EXT-X-TARGETDURATION:<seconds>`
    TargetDuration(f64),
    /// `#EXT-X-PLAYLIST-TYPE:<type>`
    PlaylistType,
    /// `#EXT-X-MEDIA-SEQUENCE:<n>`
    MediaSequence,
    /// `#EXTINF:<duration>,[title]` — announces the next media segment
    SegmentInfo(f64),
    /// A media segment URI
    MediaUri,
    /// Any other directive, comment, or blank line
    Other,
}

/// Classify a single playlist line.
///
/// A duration directive with an unparseable numeric payload is a broken test
/// asset and yields [`StreamSimError::MalformedPlaylist`].
pub fn classify(line: &str) -> Result<LineKind> {
    if let Some(rest) = line.strip_prefix("#EXTINF:") {
        let duration = parse_leading_number(rest)
            .ok_or_else(|| StreamSimError::MalformedPlaylist(format!("bad EXTINF line: {line}")))?;
        Ok(LineKind::SegmentInfo(duration))
    } else if let Some(rest) = line.strip_prefix("#EXT-X-TARGETDURATION:") {
        let duration = parse_leading_number(rest).ok_or_else(|| {
            StreamSimError::MalformedPlaylist(format!("bad TARGETDURATION line: {line}"))
        })?;
        Ok(LineKind::TargetDuration(duration))
    } else if line.starts_with("#EXT-X-PLAYLIST-TYPE:") {
        Ok(LineKind::PlaylistType)
    } else if line.starts_with("#EXT-X-MEDIA-SEQUENCE:") {
        Ok(LineKind::MediaSequence)
    } else if !line.is_empty() && !line.starts_with('#') && !line.starts_with(char::is_whitespace) {
        Ok(LineKind::MediaUri)
    } else {
        Ok(LineKind::Other)
    }
}

/// Parse the leading `[0-9.]` run of `s` as a duration in seconds.
fn parse_leading_number(s: &str) -> Option<f64> {
    let end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_segment_info() {
        assert_eq!(
            classify("#EXTINF:6.006,").unwrap(),
            LineKind::SegmentInfo(6.006)
        );
        // Title after the comma is ignored
        assert_eq!(
            classify("#EXTINF:4,segment title").unwrap(),
            LineKind::SegmentInfo(4.0)
        );
    }

    #[test]
    fn classifies_target_duration() {
        assert_eq!(
            classify("#EXT-X-TARGETDURATION:6").unwrap(),
            LineKind::TargetDuration(6.0)
        );
    }

    #[test]
    fn classifies_playlist_type_and_media_sequence() {
        assert_eq!(
            classify("#EXT-X-PLAYLIST-TYPE:VOD").unwrap(),
            LineKind::PlaylistType
        );
        assert_eq!(
            classify("#EXT-X-MEDIA-SEQUENCE:0").unwrap(),
            LineKind::MediaSequence
        );
    }

    #[test]
    fn classifies_media_uri() {
        assert_eq!(classify("seg0.ts").unwrap(), LineKind::MediaUri);
        assert_eq!(
            classify("http://example.com/seg0.ts").unwrap(),
            LineKind::MediaUri
        );
    }

    #[test]
    fn directives_comments_and_blanks_are_other() {
        assert_eq!(classify("#EXTM3U").unwrap(), LineKind::Other);
        assert_eq!(classify("#EXT-X-ENDLIST").unwrap(), LineKind::Other);
        assert_eq!(classify("# just a comment").unwrap(), LineKind::Other);
        assert_eq!(classify("").unwrap(), LineKind::Other);
        // Leading whitespace disqualifies a line from being a URI
        assert_eq!(classify("  indented").unwrap(), LineKind::Other);
    }

    #[test]
    fn malformed_extinf_is_an_error() {
        assert!(classify("#EXTINF:abc,").is_err());
        assert!(classify("#EXTINF:").is_err());
    }

    #[test]
    fn malformed_target_duration_is_an_error() {
        assert!(classify("#EXT-X-TARGETDURATION:x").is_err());
    }
}
