//! Tests for row, batch and duplicate validation

use crate::app::adapters::store::{Filter, Record, RecordId, RecordStore};
use crate::app::models::{FieldMapping, TargetField};
use crate::{Error, Result};
use async_trait::async_trait;

mod row_validation_tests;

/// Automatic mapping with a given confidence
pub fn mapping(column: &str, field: TargetField, confidence: u8) -> FieldMapping {
    FieldMapping::automatic(column, field, confidence)
}

/// Store whose every call fails, for fail-open checks
pub struct UnavailableStore;

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn select(&self, table: &str, _filter: &Filter) -> Result<Vec<Record>> {
        Err(Error::store(table, "connection refused"))
    }

    async fn insert(&self, table: &str, _record: Record) -> Result<RecordId> {
        Err(Error::store(table, "connection refused"))
    }
}
