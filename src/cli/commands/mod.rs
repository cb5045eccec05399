//! CLI command implementations.

mod config;
mod doctor;
mod init;
mod prompt;
mod serve;
mod summarize;
mod transcript;

pub use config::run_config;
pub use doctor::run_doctor;
pub use init::run_init;
pub use prompt::run_prompt;
pub use serve::run_serve;
pub use summarize::run_summarize;
pub use transcript::run_transcript;

use crate::config::Settings;
use crate::error::{Result, SkriftError};
use crate::prompt_store::{MemoryPromptStore, PromptStore, SqlitePromptStore};
use std::sync::Arc;

/// Open the configured prompt store.
pub fn open_prompt_store(settings: &Settings) -> Result<Arc<dyn PromptStore>> {
    match settings.prompt_store.provider.as_str() {
        "sqlite" => Ok(Arc::new(SqlitePromptStore::new(&settings.prompt_db_path())?)),
        "memory" => Ok(Arc::new(MemoryPromptStore::new())),
        other => Err(SkriftError::PromptStore(format!(
            "Unknown prompt store provider: {}",
            other
        ))),
    }
}
