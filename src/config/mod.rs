//! Configuration module for Skrift.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, SummarizePrompts};
pub use settings::{
    CaptionSettings, GeneralSettings, PromptSettings, PromptStoreSettings, ServerSettings,
    Settings, SummarizeSettings,
};
