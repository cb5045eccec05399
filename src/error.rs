//! Error types for Skrift.

use thiserror::Error;

/// Library-level error type for Skrift operations.
#[derive(Error, Debug)]
pub enum SkriftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Video source error: {0}")]
    VideoSource(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("No captions or transcripts available for this video")]
    CaptionsUnavailable,

    #[error("Could not find a downloadable caption format")]
    UnsupportedCaptionFormat,

    #[error("Could not parse caption content")]
    Unparseable,

    #[error("Prompt store error: {0}")]
    PromptStore(String),

    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),
}

/// Result type alias for Skrift operations.
pub type Result<T> = std::result::Result<T, SkriftError>;
