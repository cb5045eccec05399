//! Video metadata abstraction for Skrift.
//!
//! Provides a trait-based interface for video metadata providers (YouTube via yt-dlp).

mod youtube;

pub use youtube::YoutubeProvider;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single downloadable caption format within a track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionFormat {
    /// Format extension (vtt, srv3, json3, ...).
    pub ext: String,
    /// Fetch address for the caption payload.
    pub url: String,
}

/// A caption track: one language, one or more downloadable formats.
///
/// Tracks are kept in the order the provider lists them so "first available
/// language" fallback is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Language code (e.g. "en", "de").
    pub language: String,
    /// Available formats, in provider order.
    pub formats: Vec<CaptionFormat>,
}

/// Metadata about a video, including its available caption tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Channel or uploader name (if available).
    pub channel: Option<String>,
    /// Duration in seconds (if known).
    pub duration_seconds: Option<u32>,
    /// Author-supplied caption tracks.
    pub subtitles: Vec<CaptionTrack>,
    /// Machine-generated caption tracks.
    pub automatic_captions: Vec<CaptionTrack>,
}

impl VideoMetadata {
    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

/// Trait for video metadata providers.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Extract a video ID from a URL.
    fn extract_id(&self, input: &str) -> Option<String>;

    /// Fetch metadata (including caption track listings) for a video by ID.
    async fn fetch_video(&self, video_id: &str) -> Result<VideoMetadata>;
}
