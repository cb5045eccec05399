//! YouTube metadata provider implementation.

use super::{CaptionFormat, CaptionTrack, MetadataProvider, VideoMetadata};
use crate::error::{Result, SkriftError};
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

/// YouTube metadata provider backed by yt-dlp.
pub struct YoutubeProvider {
    id_patterns: Vec<Regex>,
}

impl YoutubeProvider {
    pub fn new() -> Self {
        // Recognized URL shapes, tried in order; the first match wins.
        // Each captures an 11-character video ID.
        let id_patterns = vec![
            Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("Invalid regex"),
            Regex::new(r"embed/([0-9A-Za-z_-]{11})").expect("Invalid regex"),
            Regex::new(r"watch\?v=([0-9A-Za-z_-]{11})").expect("Invalid regex"),
        ];

        Self { id_patterns }
    }

    /// Extract video ID from a YouTube URL.
    fn extract_video_id(&self, input: &str) -> Option<String> {
        let input = input.trim();
        for pattern in &self.id_patterns {
            if let Some(caps) = pattern.captures(input) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().to_string());
                }
            }
        }
        None
    }

    /// Fetch video metadata and caption track listings using yt-dlp.
    async fn fetch_metadata_ytdlp(&self, video_id: &str) -> Result<VideoMetadata> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);

        let output = tokio::process::Command::new("yt-dlp")
            .args([
                "--dump-json",
                "--no-download",
                "--no-warnings",
                "--write-subs",
                "--write-auto-subs",
                &url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SkriftError::ToolNotFound("yt-dlp".to_string())
                } else {
                    SkriftError::VideoSource(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SkriftError::VideoNotFound(format!(
                "Video {} not found or unavailable: {}",
                video_id, stderr
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&json_str)
            .map_err(|e| SkriftError::VideoSource(format!("Failed to parse yt-dlp output: {}", e)))?;

        let title = json["title"]
            .as_str()
            .unwrap_or("Unknown Title")
            .to_string();

        let channel = json["channel"]
            .as_str()
            .or_else(|| json["uploader"].as_str())
            .map(|s| s.to_string());

        let duration = json["duration"].as_f64().map(|d| d as u32);

        let subtitles = parse_caption_tracks(&json["subtitles"]);
        let automatic_captions = parse_caption_tracks(&json["automatic_captions"]);

        debug!(
            video_id,
            manual_tracks = subtitles.len(),
            automatic_tracks = automatic_captions.len(),
            "Fetched video metadata"
        );

        Ok(VideoMetadata {
            id: video_id.to_string(),
            title,
            channel,
            duration_seconds: duration,
            subtitles,
            automatic_captions,
        })
    }
}

impl Default for YoutubeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataProvider for YoutubeProvider {
    fn extract_id(&self, input: &str) -> Option<String> {
        self.extract_video_id(input)
    }

    async fn fetch_video(&self, video_id: &str) -> Result<VideoMetadata> {
        self.fetch_metadata_ytdlp(video_id).await
    }
}

/// Parse a yt-dlp caption-track object ({"en": [{ext, url, ...}, ...], ...})
/// into tracks, preserving the listing order.
fn parse_caption_tracks(value: &serde_json::Value) -> Vec<CaptionTrack> {
    let Some(map) = value.as_object() else {
        return Vec::new();
    };

    map.iter()
        .map(|(language, formats)| {
            let formats = formats
                .as_array()
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(|entry| {
                            let ext = entry["ext"].as_str()?;
                            let url = entry["url"].as_str()?;
                            Some(CaptionFormat {
                                ext: ext.to_string(),
                                url: url.to_string(),
                            })
                        })
                        .collect()
                })
                .unwrap_or_default();

            CaptionTrack {
                language: language.clone(),
                formats,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let provider = YoutubeProvider::new();

        // Test various URL formats
        assert_eq!(
            provider.extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            provider.extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            provider.extract_video_id("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            provider.extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            Some("dQw4w9WgXcQ".to_string())
        );

        // Test invalid inputs
        assert_eq!(provider.extract_video_id("https://example.com"), None);
        assert_eq!(provider.extract_video_id("not a url"), None);
        assert_eq!(provider.extract_video_id(""), None);
    }

    #[test]
    fn test_extract_video_id_underscore_and_hyphen() {
        let provider = YoutubeProvider::new();
        assert_eq!(
            provider.extract_video_id("https://youtu.be/a_b-c_d-e_f"),
            Some("a_b-c_d-e_f".to_string())
        );
    }

    #[test]
    fn test_parse_caption_tracks() {
        let json = serde_json::json!({
            "en": [
                {"ext": "vtt", "url": "https://example.com/en.vtt", "name": "English"},
                {"ext": "json3", "url": "https://example.com/en.json3"}
            ],
            "de": [
                {"ext": "vtt", "url": "https://example.com/de.vtt"}
            ]
        });

        let tracks = parse_caption_tracks(&json);
        assert_eq!(tracks.len(), 2);

        let en = tracks.iter().find(|t| t.language == "en").unwrap();
        assert_eq!(en.formats.len(), 2);
        assert_eq!(en.formats[0].ext, "vtt");
    }

    #[test]
    fn test_parse_caption_tracks_missing() {
        let json = serde_json::json!(null);
        assert!(parse_caption_tracks(&json).is_empty());
    }

    #[test]
    fn test_parse_caption_tracks_skips_incomplete_entries() {
        let json = serde_json::json!({
            "en": [
                {"ext": "vtt"},
                {"url": "https://example.com/en.srv3"},
                {"ext": "srv1", "url": "https://example.com/en.srv1"}
            ]
        });

        let tracks = parse_caption_tracks(&json);
        assert_eq!(tracks[0].formats.len(), 1);
        assert_eq!(tracks[0].formats[0].ext, "srv1");
    }
}
