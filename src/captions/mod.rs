//! Caption retrieval and normalization for Skrift.
//!
//! Selecting a caption track, fetching its payload, and normalizing the
//! payload into plain transcript text.

mod fetch;
mod normalize;

pub use fetch::{CaptionFetcher, HttpCaptionFetcher};
pub use normalize::CaptionNormalizer;

use crate::error::{Result, SkriftError};
use crate::video::{CaptionFormat, CaptionTrack};
use tracing::debug;

/// Caption format extensions we know how to download and parse, in the
/// order yt-dlp commonly lists them.
pub const SUPPORTED_FORMATS: [&str; 5] = ["vtt", "srv3", "srv2", "srv1", "json3"];

/// Select a caption format to download from a video's track listings.
///
/// Preference order: a preferred language among the author-supplied tracks,
/// then among the automatic ones, then the first available author-supplied
/// track, then the first automatic track. Within the chosen track, the first
/// format with a supported extension wins.
pub fn select_caption_format<'a>(
    subtitles: &'a [CaptionTrack],
    automatic_captions: &'a [CaptionTrack],
    preferred_languages: &[String],
) -> Result<&'a CaptionFormat> {
    let track = preferred_track(subtitles, preferred_languages)
        .or_else(|| preferred_track(automatic_captions, preferred_languages))
        .or_else(|| subtitles.first())
        .or_else(|| automatic_captions.first())
        .ok_or(SkriftError::CaptionsUnavailable)?;

    debug!(language = %track.language, "Selected caption track");

    track
        .formats
        .iter()
        .find(|f| SUPPORTED_FORMATS.contains(&f.ext.as_str()))
        .ok_or(SkriftError::UnsupportedCaptionFormat)
}

/// Find the first track matching any preferred language, in preference order.
fn preferred_track<'a>(
    tracks: &'a [CaptionTrack],
    preferred_languages: &[String],
) -> Option<&'a CaptionTrack> {
    preferred_languages
        .iter()
        .find_map(|lang| tracks.iter().find(|t| &t.language == lang))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(language: &str, exts: &[&str]) -> CaptionTrack {
        CaptionTrack {
            language: language.to_string(),
            formats: exts
                .iter()
                .map(|ext| CaptionFormat {
                    ext: ext.to_string(),
                    url: format!("https://example.com/{}.{}", language, ext),
                })
                .collect(),
        }
    }

    fn en() -> Vec<String> {
        vec!["en".to_string()]
    }

    #[test]
    fn test_prefers_manual_english() {
        let subs = vec![track("de", &["vtt"]), track("en", &["vtt"])];
        let auto = vec![track("en", &["json3"])];

        let format = select_caption_format(&subs, &auto, &en()).unwrap();
        assert_eq!(format.url, "https://example.com/en.vtt");
    }

    #[test]
    fn test_falls_back_to_automatic_english() {
        let subs = vec![track("de", &["vtt"])];
        let auto = vec![track("en", &["json3"])];

        let format = select_caption_format(&subs, &auto, &en()).unwrap();
        assert_eq!(format.url, "https://example.com/en.json3");
    }

    #[test]
    fn test_falls_back_to_first_available_language() {
        let subs = vec![track("fr", &["vtt"]), track("de", &["vtt"])];
        let auto = vec![];

        let format = select_caption_format(&subs, &auto, &en()).unwrap();
        assert_eq!(format.url, "https://example.com/fr.vtt");
    }

    #[test]
    fn test_no_tracks_at_all() {
        let err = select_caption_format(&[], &[], &en()).unwrap_err();
        assert!(matches!(err, SkriftError::CaptionsUnavailable));
    }

    #[test]
    fn test_no_supported_format() {
        let subs = vec![track("en", &["ttml", "srv4"])];
        let err = select_caption_format(&subs, &[], &en()).unwrap_err();
        assert!(matches!(err, SkriftError::UnsupportedCaptionFormat));
    }

    #[test]
    fn test_skips_unsupported_formats_within_track() {
        let subs = vec![track("en", &["ttml", "srv3", "vtt"])];
        let format = select_caption_format(&subs, &[], &en()).unwrap();
        assert_eq!(format.ext, "srv3");
    }
}
