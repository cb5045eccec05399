//! Transcript pipeline orchestrator for Skrift.
//!
//! Coordinates the process from URL to normalized transcript text:
//! ID extraction, metadata lookup, caption track selection, payload
//! download, and normalization.

use crate::captions::{select_caption_format, CaptionFetcher, CaptionNormalizer, HttpCaptionFetcher};
use crate::config::{Prompts, Settings};
use crate::error::{Result, SkriftError};
use crate::summarize::SummarizeEngine;
use crate::video::{MetadataProvider, YoutubeProvider};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// A finished transcript with the video metadata it came from.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptResult {
    pub video_id: String,
    pub title: String,
    pub channel: Option<String>,
    pub duration_seconds: Option<u32>,
    pub transcript: String,
}

/// The main orchestrator for the Skrift pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    provider: Arc<dyn MetadataProvider>,
    fetcher: Arc<dyn CaptionFetcher>,
    normalizer: CaptionNormalizer,
}

impl Orchestrator {
    /// Create a new orchestrator with default collaborators.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let fetcher = Arc::new(HttpCaptionFetcher::new(Duration::from_secs(
            settings.captions.fetch_timeout_seconds,
        ))?);

        Ok(Self {
            settings,
            prompts,
            provider: Arc::new(YoutubeProvider::new()),
            fetcher,
            normalizer: CaptionNormalizer::new(),
        })
    }

    /// Create an orchestrator with custom collaborators.
    pub fn with_components(
        settings: Settings,
        provider: Arc<dyn MetadataProvider>,
        fetcher: Arc<dyn CaptionFetcher>,
    ) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        Ok(Self {
            settings,
            prompts,
            provider,
            fetcher,
            normalizer: CaptionNormalizer::new(),
        })
    }

    /// Fetch and normalize the caption transcript for a video URL.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn transcript(&self, url: &str, include_timestamps: bool) -> Result<TranscriptResult> {
        let video_id = self
            .provider
            .extract_id(url)
            .ok_or_else(|| SkriftError::InvalidInput(format!("Invalid YouTube URL: {}", url)))?;

        info!(video_id, "Fetching video metadata");
        let metadata = self.provider.fetch_video(&video_id).await?;

        let format = select_caption_format(
            &metadata.subtitles,
            &metadata.automatic_captions,
            &self.settings.captions.preferred_languages,
        )?;

        info!(ext = %format.ext, "Downloading caption payload");
        let payload = self.fetcher.fetch(&format.url).await?;

        let transcript = self.normalizer.normalize(&payload, include_timestamps)?;

        Ok(TranscriptResult {
            video_id: metadata.id,
            title: metadata.title,
            channel: metadata.channel,
            duration_seconds: metadata.duration_seconds,
            transcript,
        })
    }

    /// Summarize an already-fetched transcript with a free-form instruction.
    pub async fn summarize(
        &self,
        title: &str,
        transcript: &str,
        instruction: &str,
        model: Option<&str>,
    ) -> Result<String> {
        let model = model.unwrap_or(&self.settings.summarize.model);

        let engine = SummarizeEngine::new(model, self.settings.summarize.temperature)
            .with_prompts(self.prompts.clone());

        engine.summarize(title, transcript, instruction).await
    }

    /// The active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::{CaptionFormat, CaptionTrack, VideoMetadata};
    use async_trait::async_trait;

    struct FakeProvider {
        metadata: VideoMetadata,
    }

    #[async_trait]
    impl MetadataProvider for FakeProvider {
        fn extract_id(&self, input: &str) -> Option<String> {
            YoutubeProvider::new().extract_id(input)
        }

        async fn fetch_video(&self, _video_id: &str) -> Result<VideoMetadata> {
            Ok(self.metadata.clone())
        }
    }

    struct FakeFetcher {
        payload: String,
    }

    #[async_trait]
    impl CaptionFetcher for FakeFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.payload.clone())
        }
    }

    fn metadata_with_vtt() -> VideoMetadata {
        VideoMetadata {
            id: "dQw4w9WgXcQ".to_string(),
            title: "Test Video".to_string(),
            channel: Some("Test Channel".to_string()),
            duration_seconds: Some(212),
            subtitles: vec![CaptionTrack {
                language: "en".to_string(),
                formats: vec![CaptionFormat {
                    ext: "vtt".to_string(),
                    url: "https://example.com/en.vtt".to_string(),
                }],
            }],
            automatic_captions: vec![],
        }
    }

    fn orchestrator_with(payload: &str) -> Orchestrator {
        Orchestrator::with_components(
            Settings::default(),
            Arc::new(FakeProvider {
                metadata: metadata_with_vtt(),
            }),
            Arc::new(FakeFetcher {
                payload: payload.to_string(),
            }),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_transcript_end_to_end() {
        let orchestrator =
            orchestrator_with("WEBVTT\n\n00:00:01.000 --> 00:00:03.000\nNever gonna give you up\n");

        let result = orchestrator
            .transcript("https://www.youtube.com/watch?v=dQw4w9WgXcQ", false)
            .await
            .unwrap();

        assert_eq!(result.video_id, "dQw4w9WgXcQ");
        assert_eq!(result.title, "Test Video");
        assert_eq!(result.transcript, "Never gonna give you up");
    }

    #[tokio::test]
    async fn test_transcript_with_timestamps() {
        let orchestrator =
            orchestrator_with("WEBVTT\n\n00:00:05.000 --> 00:00:07.000\nHello\n");

        let result = orchestrator
            .transcript("https://youtu.be/dQw4w9WgXcQ", true)
            .await
            .unwrap();

        assert_eq!(result.transcript, "[00:05] Hello");
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_any_lookup() {
        let orchestrator = orchestrator_with("irrelevant");

        let err = orchestrator
            .transcript("https://example.com/page", false)
            .await
            .unwrap_err();

        assert!(matches!(err, SkriftError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_unparseable_payload_surfaces() {
        let orchestrator = orchestrator_with("WEBVTT\n\n");

        let err = orchestrator
            .transcript("https://youtu.be/dQw4w9WgXcQ", false)
            .await
            .unwrap_err();

        assert!(matches!(err, SkriftError::Unparseable));
    }
}
