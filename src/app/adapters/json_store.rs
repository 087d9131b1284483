//! JSON file-backed record store
//!
//! Loads the whole file on open and rewrites it after every accepted
//! insert, so a run that is interrupted keeps every record written so far.
//! An insert whose file write fails leaves both the file and the in-memory
//! tables unchanged.

use super::memory_store::{InMemoryStore, Tables};
use super::store::{Filter, Record, RecordId, RecordStore};
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Record store persisted to a single JSON document
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    memory: InMemoryStore,
}

impl JsonFileStore {
    /// Open a store file, starting empty when it does not exist yet
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let exists = tokio::fs::try_exists(&path).await.map_err(|e| {
            Error::io(format!("Failed to access store '{}'", path.display()), e)
        })?;

        let tables = if exists {
            let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                Error::io(format!("Failed to read store '{}'", path.display()), e)
            })?;
            if content.trim().is_empty() {
                Tables::default()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    Error::serialization(format!("Corrupt store '{}'", path.display()), e)
                })?
            }
        } else {
            Tables::default()
        };

        debug!(
            "Opened store {} with {} tables",
            path.display(),
            tables.tables.len()
        );

        Ok(Self {
            path,
            memory: InMemoryStore::from_tables(tables),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records in a table
    pub async fn count(&self, table: &str) -> usize {
        self.memory.count(table).await
    }

    async fn persist(&self, table: &str, tables: &Tables) -> Result<()> {
        let content = serde_json::to_string_pretty(tables)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::store(table, format!("create {}: {}", parent.display(), e)))?;
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| Error::store(table, format!("write {}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Record>> {
        self.memory.select(table, filter).await
    }

    async fn insert(&self, table: &str, record: Record) -> Result<RecordId> {
        // Memory only changes once the file holds the new record
        let mut tables = self.memory.write_tables().await;
        let mut updated = Tables::clone(&tables);
        let id = updated.insert(table, record);

        self.persist(table, &updated).await?;
        *tables = updated;
        Ok(id)
    }
}
