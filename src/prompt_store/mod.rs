//! Prompt template store abstraction for Skrift.
//!
//! Provides a trait-based interface for persisting reusable prompt templates.

mod memory;
mod sqlite;

pub use memory::MemoryPromptStore;
pub use sqlite::SqlitePromptStore;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable prompt template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Unique template ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The instruction text sent to the LLM.
    pub text: String,
    /// When the template was created.
    pub created_at: DateTime<Utc>,
    /// When the template was last modified.
    pub updated_at: DateTime<Utc>,
}

impl PromptTemplate {
    /// Create a new template with a fresh ID.
    pub fn new(name: String, text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            text,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Trait for prompt template store implementations.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// List all templates, newest first.
    async fn list(&self) -> Result<Vec<PromptTemplate>>;

    /// Get a template by ID.
    async fn get(&self, id: Uuid) -> Result<PromptTemplate>;

    /// Find a template by name.
    async fn find_by_name(&self, name: &str) -> Result<Option<PromptTemplate>>;

    /// Create a template and return it.
    async fn create(&self, name: &str, text: &str) -> Result<PromptTemplate>;

    /// Update a template's name and text.
    async fn update(&self, id: Uuid, name: &str, text: &str) -> Result<PromptTemplate>;

    /// Delete a template by ID.
    async fn delete(&self, id: Uuid) -> Result<()>;
}
