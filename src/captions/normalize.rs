//! Caption payload normalization.
//!
//! Decodes either YouTube's json3 event-stream format or a WebVTT/SRT-like
//! cue format into a plain transcript, optionally with inline `[MM:SS]`
//! markers. Formats are tried in a fixed order; the first parser that
//! recognizes the payload wins.

use crate::error::{Result, SkriftError};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

/// A parsing strategy for one caption wire format.
///
/// Returns `None` when the payload is not in this strategy's format. A
/// recognized payload returns its normalized text even when that text is
/// empty; emptiness is judged by the normalizer, not the strategy.
trait CaptionParser: Send + Sync {
    fn name(&self) -> &'static str;

    fn parse(&self, payload: &str, include_timestamps: bool) -> Option<String>;
}

/// Normalizes raw caption payloads into transcript text.
pub struct CaptionNormalizer {
    parsers: Vec<Box<dyn CaptionParser>>,
}

impl CaptionNormalizer {
    pub fn new() -> Self {
        // json3 is always tried first; the cue parser accepts anything
        // line-shaped, so it must come last.
        Self {
            parsers: vec![Box::new(Json3Parser), Box::new(CueParser::new())],
        }
    }

    /// Normalize a raw caption payload.
    ///
    /// An empty result is indistinguishable from an unrecognized payload:
    /// both surface as [`SkriftError::Unparseable`].
    pub fn normalize(&self, payload: &str, include_timestamps: bool) -> Result<String> {
        for parser in &self.parsers {
            if let Some(text) = parser.parse(payload, include_timestamps) {
                debug!(parser = parser.name(), "Caption payload recognized");

                if text.trim().is_empty() {
                    return Err(SkriftError::Unparseable);
                }
                return Ok(text);
            }
        }

        Err(SkriftError::Unparseable)
    }
}

impl Default for CaptionNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

// === json3 event stream ===

#[derive(Debug, Deserialize)]
struct Json3Payload {
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs")]
    start_ms: Option<u64>,
    segs: Option<Vec<Json3Segment>>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    utf8: Option<String>,
}

/// Parser for YouTube's structured json3 caption format.
///
/// A payload only counts as json3 when it deserializes as the container
/// and carries an `events` collection; anything else falls through to the
/// next strategy.
struct Json3Parser;

impl CaptionParser for Json3Parser {
    fn name(&self) -> &'static str {
        "json3"
    }

    fn parse(&self, payload: &str, include_timestamps: bool) -> Option<String> {
        let parsed: Json3Payload = serde_json::from_str(payload).ok()?;

        let mut pieces = Vec::new();
        for event in parsed.events {
            let Some(segs) = event.segs else { continue };

            // One marker per event, attached to its first non-empty segment.
            let mut marker = match (include_timestamps, event.start_ms) {
                (true, Some(ms)) => Some(event_marker(ms)),
                _ => None,
            };

            for seg in segs {
                let Some(text) = seg.utf8 else { continue };
                let text = text.replace('\n', " ");
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }

                match marker.take() {
                    Some(m) => pieces.push(format!("{} {}", m, text)),
                    None => pieces.push(text.to_string()),
                }
            }
        }

        Some(pieces.join(" "))
    }
}

/// `[MM:SS]` marker from a start time in milliseconds.
///
/// Minutes are not hour-wrapped; past 99 minutes the field simply widens.
fn event_marker(start_ms: u64) -> String {
    let total_seconds = start_ms / 1000;
    format!("[{:02}:{:02}]", total_seconds / 60, total_seconds % 60)
}

// === line-oriented cue format (WebVTT / SRT) ===

/// Parser for line-oriented cue formats.
struct CueParser {
    timing_re: Regex,
    bare_timestamp_re: Regex,
    markup_re: Regex,
}

impl CueParser {
    fn new() -> Self {
        Self {
            timing_re: Regex::new(r"^(\d{2}):(\d{2}):(\d{2})").expect("Invalid regex"),
            bare_timestamp_re: Regex::new(r"^\d{2}:\d{2}:\d{2}").expect("Invalid regex"),
            markup_re: Regex::new(r"<[^>]+>").expect("Invalid regex"),
        }
    }

    /// `[MM:SS]` marker from a cue timing line's start time.
    ///
    /// Unlike the json3 branch, hours fold into the minute field here
    /// (01:02:03 becomes [62:03]).
    fn timing_marker(&self, line: &str) -> Option<String> {
        let caps = self.timing_re.captures(line)?;
        let hours: u64 = caps[1].parse().ok()?;
        let minutes: u64 = caps[2].parse().ok()?;
        let seconds: u64 = caps[3].parse().ok()?;

        Some(format!("[{:02}:{:02}]", hours * 60 + minutes, seconds))
    }
}

impl CaptionParser for CueParser {
    fn name(&self) -> &'static str {
        "cue"
    }

    fn parse(&self, payload: &str, include_timestamps: bool) -> Option<String> {
        let mut lines = Vec::new();
        let mut pending_marker: Option<String> = None;

        for raw in payload.lines() {
            let line = raw.trim();

            // Timing lines feed the pending marker and are never emitted.
            if line.contains("-->") {
                if include_timestamps {
                    if let Some(marker) = self.timing_marker(line) {
                        pending_marker = Some(marker);
                    }
                }
                continue;
            }

            // Blank lines, the WEBVTT header, and cue index lines.
            if line.is_empty()
                || line.starts_with("WEBVTT")
                || line.chars().all(|c| c.is_ascii_digit())
            {
                continue;
            }

            let stripped = self.markup_re.replace_all(line, "");
            let stripped = stripped.trim();

            if stripped.is_empty() || self.bare_timestamp_re.is_match(stripped) {
                continue;
            }

            match pending_marker.take() {
                Some(marker) => lines.push(format!("{} {}", marker, stripped)),
                None => lines.push(stripped.to_string()),
            }
        }

        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> CaptionNormalizer {
        CaptionNormalizer::new()
    }

    fn json3(events: serde_json::Value) -> String {
        serde_json::json!({ "events": events }).to_string()
    }

    #[test]
    fn test_json3_segments_joined_with_spaces() {
        let payload = json3(serde_json::json!([
            {"tStartMs": 0, "segs": [{"utf8": "hello"}]},
            {"tStartMs": 1500, "segs": [{"utf8": "world"}]},
            {"tStartMs": 3000, "segs": [{"utf8": "again"}]}
        ]));

        let text = normalizer().normalize(&payload, false).unwrap();
        assert_eq!(text, "hello world again");
    }

    #[test]
    fn test_json3_marker_on_first_segment_only() {
        let payload = json3(serde_json::json!([
            {"tStartMs": 65000, "segs": [{"utf8": "first"}, {"utf8": "second"}]}
        ]));

        let text = normalizer().normalize(&payload, true).unwrap();
        assert_eq!(text, "[01:05] first second");
    }

    #[test]
    fn test_json3_minutes_do_not_hour_wrap() {
        let payload = json3(serde_json::json!([
            {"tStartMs": 6_000_000, "segs": [{"utf8": "late"}]}
        ]));

        let text = normalizer().normalize(&payload, true).unwrap();
        assert_eq!(text, "[100:00] late");
    }

    #[test]
    fn test_json3_collapses_embedded_newlines() {
        let payload = json3(serde_json::json!([
            {"segs": [{"utf8": "two\nwords"}]}
        ]));

        let text = normalizer().normalize(&payload, false).unwrap();
        assert_eq!(text, "two words");
    }

    #[test]
    fn test_json3_marker_skips_empty_segments() {
        let payload = json3(serde_json::json!([
            {"tStartMs": 5000, "segs": [{"utf8": "\n"}, {"utf8": "spoken"}]}
        ]));

        let text = normalizer().normalize(&payload, true).unwrap();
        assert_eq!(text, "[00:05] spoken");
    }

    #[test]
    fn test_json3_event_without_timing_gets_no_marker() {
        let payload = json3(serde_json::json!([
            {"segs": [{"utf8": "untimed"}]},
            {"tStartMs": 60000, "segs": [{"utf8": "timed"}]}
        ]));

        let text = normalizer().normalize(&payload, true).unwrap();
        assert_eq!(text, "untimed [01:00] timed");
    }

    #[test]
    fn test_json3_with_zero_events_is_unparseable_not_fallback() {
        // Valid container, nothing inside. The cue parser must not be
        // reached even though the raw payload has parseable "lines".
        let payload = json3(serde_json::json!([]));

        let err = normalizer().normalize(&payload, false).unwrap_err();
        assert!(matches!(err, SkriftError::Unparseable));
    }

    #[test]
    fn test_json_without_events_field_falls_back_to_cue() {
        // Missing `events` is a parse failure, not an empty track, so the
        // cue parser gets the payload and treats it as plain lines.
        let payload = r#"{"wireMagic": "pb3"}"#;

        let text = normalizer().normalize(payload, false).unwrap();
        assert_eq!(text, r#"{"wireMagic": "pb3"}"#);
    }

    #[test]
    fn test_cue_timing_line_yields_marker() {
        let payload = "WEBVTT\n\n00:01:05.000 --> 00:01:08.000\nHello there\n";

        let text = normalizer().normalize(payload, true).unwrap();
        assert_eq!(text, "[01:05] Hello there");
    }

    #[test]
    fn test_cue_start_time_folds_hours_into_minutes() {
        let payload = "01:02:03.000 --> 01:02:05.000\nAn hour in\n";

        let text = normalizer().normalize(payload, true).unwrap();
        assert_eq!(text, "[62:03] An hour in");
    }

    #[test]
    fn test_cue_marker_consumed_by_first_line_of_block() {
        let payload = "00:00:10.000 --> 00:00:12.000\nline one\nline two\n";

        let text = normalizer().normalize(payload, true).unwrap();
        assert_eq!(text, "[00:10] line one\nline two");
    }

    #[test]
    fn test_cue_without_timestamps_discards_timing_lines() {
        let payload = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\nfirst cue\n\n2\n00:00:02.000 --> 00:00:04.000\nsecond cue\n";

        let text = normalizer().normalize(payload, false).unwrap();
        assert_eq!(text, "first cue\nsecond cue");
    }

    #[test]
    fn test_cue_strips_markup() {
        let payload = "00:00:01.000 --> 00:00:02.000\n<i>word</i>\n";

        let text = normalizer().normalize(payload, false).unwrap();
        assert_eq!(text, "word");
    }

    #[test]
    fn test_cue_discards_bare_timestamp_lines() {
        let payload = "00:00:01.000 spacer\nreal text\n";

        let text = normalizer().normalize(payload, false).unwrap();
        assert_eq!(text, "real text");
    }

    #[test]
    fn test_cue_line_empty_after_markup_strip_is_dropped() {
        let payload = "00:00:01.000 --> 00:00:02.000\n<c.colorCCCCCC></c>\nspoken\n";

        let text = normalizer().normalize(payload, true).unwrap();
        assert_eq!(text, "[00:01] spoken");
    }

    #[test]
    fn test_header_and_blank_lines_only_is_unparseable() {
        let payload = "WEBVTT\n\n\n";

        let err = normalizer().normalize(payload, false).unwrap_err();
        assert!(matches!(err, SkriftError::Unparseable));
    }

    #[test]
    fn test_empty_payload_is_unparseable() {
        let err = normalizer().normalize("", true).unwrap_err();
        assert!(matches!(err, SkriftError::Unparseable));
    }
}
