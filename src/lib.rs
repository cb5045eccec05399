//! Skrift - YouTube Transcripts and Summaries
//!
//! A web and CLI tool for fetching YouTube caption transcripts and
//! summarizing them with an LLM.
//!
//! The name "Skrift" comes from the Norwegian word for "writing."
//!
//! # Overview
//!
//! Skrift allows you to:
//! - Fetch the caption transcript of any YouTube video, with optional
//!   `[MM:SS]` timestamp markers
//! - Summarize or analyze a transcript with a free-form instruction
//! - Keep a small library of reusable prompt templates on disk
//! - Run everything from a browser via the built-in web app
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `video` - Video metadata providers (YouTube via yt-dlp)
//! - `captions` - Caption track selection, download, and normalization
//! - `prompt_store` - Persistent prompt template storage
//! - `summarize` - LLM summarization
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use skrift::config::Settings;
//! use skrift::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let result = orchestrator
//!         .transcript("https://www.youtube.com/watch?v=dQw4w9WgXcQ", false)
//!         .await?;
//!     println!("{}", result.transcript);
//!
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod prompt_store;
pub mod summarize;
pub mod video;

pub use error::{Result, SkriftError};
