//! In-process record store
//!
//! Keeps tables in memory behind an async lock. Used by tests and as the
//! working set of the JSON file store.

use super::store::{Filter, Record, RecordId, RecordStore};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::{RwLock, RwLockWriteGuard};

/// Tables of JSON records with sequential ids
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
pub(crate) struct Tables {
    pub(crate) next_id: RecordId,
    pub(crate) tables: BTreeMap<String, Vec<Record>>,
}

impl Tables {
    pub(crate) fn insert(&mut self, table: &str, mut record: Record) -> RecordId {
        self.next_id += 1;
        let id = self.next_id;
        record.insert("id".to_string(), Value::from(id));
        self.tables.entry(table.to_string()).or_default().push(record);
        id
    }

    pub(crate) fn select(&self, table: &str, filter: &Filter) -> Vec<Record> {
        self.tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| filter.matches(r)).cloned().collect())
            .unwrap_or_default()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_tables(tables: Tables) -> Self {
        Self {
            inner: RwLock::new(tables),
        }
    }

    /// Exclusive access to the tables for a check-then-commit update
    pub(crate) async fn write_tables(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().await
    }

    /// Number of records in a table
    pub async fn count(&self, table: &str) -> usize {
        self.inner
            .read()
            .await
            .tables
            .get(table)
            .map_or(0, Vec::len)
    }

    /// Insert a fixture record without going through the trait object
    pub async fn seed(&self, table: &str, record: Record) -> RecordId {
        self.inner.write().await.insert(table, record)
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Record>> {
        Ok(self.inner.read().await.select(table, filter))
    }

    async fn insert(&self, table: &str, record: Record) -> Result<RecordId> {
        Ok(self.inner.write().await.insert(table, record))
    }
}
