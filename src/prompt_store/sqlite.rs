//! SQLite-based prompt template store implementation.

use super::{PromptStore, PromptTemplate};
use crate::error::{Result, SkriftError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS prompts (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    text TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_prompts_name ON prompts(name);
"#;

/// SQLite-based prompt store.
pub struct SqlitePromptStore {
    conn: Mutex<Connection>,
}

impl SqlitePromptStore {
    /// Create a new SQLite prompt store.
    pub fn new(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized prompt store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite prompt store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn row_to_template(row: &Row<'_>) -> rusqlite::Result<PromptTemplate> {
        let id: String = row.get(0)?;
        let created_at: String = row.get(3)?;
        let updated_at: String = row.get(4)?;

        Ok(PromptTemplate {
            id: Uuid::parse_str(&id).unwrap_or_default(),
            name: row.get(1)?,
            text: row.get(2)?,
            created_at: parse_datetime(&created_at),
            updated_at: parse_datetime(&updated_at),
        })
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[async_trait]
impl PromptStore for SqlitePromptStore {
    async fn list(&self) -> Result<Vec<PromptTemplate>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, text, created_at, updated_at FROM prompts ORDER BY created_at DESC",
        )?;

        let templates = stmt
            .query_map([], Self::row_to_template)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(templates)
    }

    async fn get(&self, id: Uuid) -> Result<PromptTemplate> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT id, name, text, created_at, updated_at FROM prompts WHERE id = ?1")?;

        stmt.query_row(params![id.to_string()], Self::row_to_template)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => SkriftError::PromptNotFound(id.to_string()),
                other => SkriftError::Database(other),
            })
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<PromptTemplate>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, text, created_at, updated_at FROM prompts WHERE name = ?1 LIMIT 1",
        )?;

        match stmt.query_row(params![name], Self::row_to_template) {
            Ok(template) => Ok(Some(template)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(SkriftError::Database(e)),
        }
    }

    async fn create(&self, name: &str, text: &str) -> Result<PromptTemplate> {
        let template = PromptTemplate::new(name.to_string(), text.to_string());

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO prompts (id, name, text, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                template.id.to_string(),
                template.name,
                template.text,
                template.created_at.to_rfc3339(),
                template.updated_at.to_rfc3339(),
            ],
        )?;

        debug!(id = %template.id, name = %template.name, "Created prompt template");

        Ok(template)
    }

    async fn update(&self, id: Uuid, name: &str, text: &str) -> Result<PromptTemplate> {
        let updated_at = Utc::now();

        {
            let conn = self.conn.lock().unwrap();
            let changed = conn.execute(
                "UPDATE prompts SET name = ?2, text = ?3, updated_at = ?4 WHERE id = ?1",
                params![id.to_string(), name, text, updated_at.to_rfc3339()],
            )?;

            if changed == 0 {
                return Err(SkriftError::PromptNotFound(id.to_string()));
            }
        }

        self.get(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute("DELETE FROM prompts WHERE id = ?1", params![id.to_string()])?;

        if changed == 0 {
            return Err(SkriftError::PromptNotFound(id.to_string()));
        }

        debug!(id = %id, "Deleted prompt template");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SqlitePromptStore::in_memory().unwrap();

        let created = store.create("summary", "Summarize this.").await.unwrap();
        let fetched = store.get(created.id).await.unwrap();

        assert_eq!(fetched.name, "summary");
        assert_eq!(fetched.text, "Summarize this.");
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let store = SqlitePromptStore::in_memory().unwrap();

        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, SkriftError::PromptNotFound(_)));
    }

    #[tokio::test]
    async fn test_update() {
        let store = SqlitePromptStore::in_memory().unwrap();

        let created = store.create("summary", "old").await.unwrap();
        let updated = store.update(created.id, "key points", "new").await.unwrap();

        assert_eq!(updated.name, "key points");
        assert_eq!(updated.text, "new");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = SqlitePromptStore::in_memory().unwrap();

        let err = store.update(Uuid::new_v4(), "x", "y").await.unwrap_err();
        assert!(matches!(err, SkriftError::PromptNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = SqlitePromptStore::in_memory().unwrap();

        let created = store.create("summary", "text").await.unwrap();
        store.delete(created.id).await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
        assert!(store.get(created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let store = SqlitePromptStore::in_memory().unwrap();

        store.create("summary", "text").await.unwrap();

        let found = store.find_by_name("summary").await.unwrap();
        assert!(found.is_some());

        let missing = store.find_by_name("nonexistent").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.db");

        let id = {
            let store = SqlitePromptStore::new(&path).unwrap();
            store.create("summary", "text").await.unwrap().id
        };

        let reopened = SqlitePromptStore::new(&path).unwrap();
        let fetched = reopened.get(id).await.unwrap();
        assert_eq!(fetched.name, "summary");
    }
}
