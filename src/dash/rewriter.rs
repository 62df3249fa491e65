//! Event windowing of DASH manifests.
//!
//! A static manifest with a segment timeline is rewritten into its dynamic,
//! partially-available state at the given virtual playback position. The
//! manifest is processed in a single pass, line by line; only four line
//! shapes are touched (`type="static"`, `mediaPresentationDuration`,
//! `timescale`, and `<S .../>` segment descriptors), everything else is
//! passed through byte for byte.
//!
//! Attribute extraction is plain word-boundary-aware substring scanning —
//! this is a test fixture rewriting text it must not otherwise disturb, so
//! the surrounding XML is never parsed or re-serialized.

use crate::error::{Result, StreamSimError};
use std::borrow::Cow;

/// Timescale assumed until the manifest declares one, in units per second.
const DEFAULT_TIMESCALE: f64 = 10000.0;

/// Rewrite a DASH manifest as it would appear at `play_position` seconds
/// into an event session.
pub fn rewrite_manifest(content: &str, play_position: f64) -> Result<String> {
    let mut timescale = DEFAULT_TIMESCALE;
    // Running start time, in seconds, of the next segment group without an
    // explicit `t` attribute.
    let mut segment_time = 0.0_f64;
    let mut out = String::with_capacity(content.len());

    for line in content.lines() {
        let mut line = Cow::Borrowed(line);

        // A dynamic manifest in the making: flip the presentation type.
        if line.contains("type=\"static\"") {
            line = Cow::Owned(line.replace("\"static\"", "\"dynamic\""));
        }

        // A dynamic manifest has no fixed total duration.
        if let Some(stripped) = strip_attribute(&line, "mediaPresentationDuration") {
            line = Cow::Owned(stripped);
        }

        // Each timescale declaration opens a fresh timeline accounting scope.
        if let Some(value) = attribute_value(&line, "timescale") {
            timescale = value.parse::<f64>().map_err(|_| {
                StreamSimError::MalformedManifest(format!("bad timescale value: {value}"))
            })?;
            segment_time = 0.0;
        }

        if let Some((start, end)) = descriptor_span(&line) {
            let descriptor = &line[start..end];
            match rewrite_descriptor(descriptor, timescale, &mut segment_time, play_position)? {
                // No occurrence in this group is playable yet.
                None => continue,
                Some(rewritten) => {
                    let mut replaced =
                        String::with_capacity(line.len() - descriptor.len() + rewritten.len());
                    replaced.push_str(&line[..start]);
                    replaced.push_str(&rewritten);
                    replaced.push_str(&line[end..]);
                    line = Cow::Owned(replaced);
                }
            }
        }

        out.push_str(&line);
        out.push('\n');
    }

    Ok(out)
}

/// Truncate one `<S .../>` descriptor against the playback position.
///
/// Advances `segment_time` to the end of the full original group regardless
/// of truncation, so following groups without an explicit `t` chain
/// correctly. Returns `None` when the group has no playable occurrence yet.
fn rewrite_descriptor(
    descriptor: &str,
    timescale: f64,
    segment_time: &mut f64,
    play_position: f64,
) -> Result<Option<String>> {
    let duration: u64 = parse_attr(descriptor, "d")?.ok_or_else(|| {
        StreamSimError::MalformedManifest(format!("segment descriptor missing d: {descriptor}"))
    })?;
    let d = duration as f64;

    // `r` is a repeat count: `r + 1` total occurrences, defaulting to one.
    let mut occurrences = parse_attr(descriptor, "r")?.map_or(1.0, |r: u64| r as f64 + 1.0);

    let start_time: Option<u64> = parse_attr(descriptor, "t")?;
    let group_start = match start_time {
        Some(t) => t as f64 / timescale,
        None => *segment_time,
    };

    // How many occurrences of this group have virtually elapsed.
    let elapsed = (play_position - group_start) / (d / timescale);
    *segment_time = group_start + (occurrences * d) / timescale;

    if elapsed < 1.0 {
        return Ok(None);
    }
    if elapsed <= occurrences {
        occurrences = elapsed;
    }

    let rewritten = match (start_time, occurrences >= 2.0) {
        (Some(t), true) => format!(
            "<S t=\"{}\" d=\"{}\" r=\"{}\" />",
            t,
            duration,
            (occurrences - 1.0) as u64
        ),
        (Some(t), false) => format!("<S t=\"{}\" d=\"{}\" />", t, duration),
        (None, true) => format!("<S d=\"{}\" r=\"{}\" />", duration, (occurrences - 1.0) as u64),
        (None, false) => format!("<S d=\"{}\" />", duration),
    };
    Ok(Some(rewritten))
}

/// Locate a self-closing `<S .../>` element within a line.
///
/// `<S` must be followed by whitespace so `<SegmentTimeline>` and friends
/// are left alone; the scan continues past such prefixes, so a descriptor
/// inlined after other elements is still found. Returns the byte span
/// including both delimiters.
fn descriptor_span(line: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(pos) = line[from..].find("<S") {
        let start = from + pos;
        match line[start + 2..].chars().next() {
            Some(next) if next.is_whitespace() => {
                let end = line[start..].find("/>")?;
                return Some((start, start + end + 2));
            }
            Some(_) => from = start + 2,
            None => return None,
        }
    }
    None
}

/// Extract the value of `name="value"`, honoring a word boundary before the
/// attribute name (so `t` never matches inside `presentationTimeOffset`).
fn attribute_value<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{name}=\"");
    let mut from = 0;
    while let Some(pos) = s[from..].find(&needle) {
        let at = from + pos;
        let bounded = !s[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if bounded {
            let value_start = at + needle.len();
            let value_end = s[value_start..].find('"')?;
            return Some(&s[value_start..value_start + value_end]);
        }
        from = at + needle.len();
    }
    None
}

/// Parse a numeric attribute, distinguishing "absent" from "unparseable".
fn parse_attr(s: &str, name: &str) -> Result<Option<u64>> {
    match attribute_value(s, name) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            StreamSimError::MalformedManifest(format!("bad {name} attribute value: {value}"))
        }),
    }
}

/// Remove `name="value"` (the attribute text only) from a line, if present.
fn strip_attribute(line: &str, name: &str) -> Option<String> {
    let needle = format!("{name}=\"");
    let start = line.find(&needle)?;
    let value_start = start + needle.len();
    let value_end = line[value_start..].find('"')?;
    let end = value_start + value_end + 1;

    let mut stripped = String::with_capacity(line.len() - (end - start));
    stripped.push_str(&line[..start]);
    stripped.push_str(&line[end..]);
    Some(stripped)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
