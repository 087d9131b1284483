//! Tests for end-to-end pipeline runs

use crate::app::adapters::store::{Filter, Record, RecordId, RecordStore};
use crate::app::services::csv_reader::{CsvDocument, CsvReader};
use crate::{Error, Result};
use async_trait::async_trait;

mod pipeline_tests;

/// Parse inline CSV text
pub fn document(content: &str) -> CsvDocument {
    CsvReader::new().read_str(content).unwrap()
}

/// Store that cannot be queried but accepts writes
#[derive(Default)]
pub struct SelectFailingStore {
    pub inner: crate::app::adapters::memory_store::InMemoryStore,
}

#[async_trait]
impl RecordStore for SelectFailingStore {
    async fn select(&self, table: &str, _filter: &Filter) -> Result<Vec<Record>> {
        Err(Error::store(table, "query timed out"))
    }

    async fn insert(&self, table: &str, record: Record) -> Result<RecordId> {
        self.inner.insert(table, record).await
    }
}
