//! In-memory prompt template store implementation.
//!
//! Useful for testing and ephemeral runs.

use super::{PromptStore, PromptTemplate};
use crate::error::{Result, SkriftError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory prompt store.
pub struct MemoryPromptStore {
    templates: RwLock<HashMap<Uuid, PromptTemplate>>,
}

impl MemoryPromptStore {
    /// Create a new in-memory prompt store.
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryPromptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptStore for MemoryPromptStore {
    async fn list(&self) -> Result<Vec<PromptTemplate>> {
        let templates = self.templates.read().unwrap();

        let mut all: Vec<PromptTemplate> = templates.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(all)
    }

    async fn get(&self, id: Uuid) -> Result<PromptTemplate> {
        let templates = self.templates.read().unwrap();
        templates
            .get(&id)
            .cloned()
            .ok_or_else(|| SkriftError::PromptNotFound(id.to_string()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<PromptTemplate>> {
        let templates = self.templates.read().unwrap();
        Ok(templates.values().find(|t| t.name == name).cloned())
    }

    async fn create(&self, name: &str, text: &str) -> Result<PromptTemplate> {
        let template = PromptTemplate::new(name.to_string(), text.to_string());

        let mut templates = self.templates.write().unwrap();
        templates.insert(template.id, template.clone());

        Ok(template)
    }

    async fn update(&self, id: Uuid, name: &str, text: &str) -> Result<PromptTemplate> {
        let mut templates = self.templates.write().unwrap();

        let template = templates
            .get_mut(&id)
            .ok_or_else(|| SkriftError::PromptNotFound(id.to_string()))?;

        template.name = name.to_string();
        template.text = text.to_string();
        template.updated_at = Utc::now();

        Ok(template.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut templates = self.templates.write().unwrap();
        templates
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| SkriftError::PromptNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_crud_cycle() {
        let store = MemoryPromptStore::new();

        let created = store.create("summary", "Summarize this.").await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);

        let updated = store.update(created.id, "summary", "Be brief.").await.unwrap();
        assert_eq!(updated.text, "Be brief.");

        store.delete(created.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let store = MemoryPromptStore::new();

        let err = store.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, SkriftError::PromptNotFound(_)));
    }
}
