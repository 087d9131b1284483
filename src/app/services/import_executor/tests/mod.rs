//! Tests for import execution

use crate::app::adapters::memory_store::InMemoryStore;
use crate::app::adapters::store::{Filter, Record, RecordId, RecordStore};
use crate::app::models::{
    CandidateRow, CsvRow, FieldMapping, ImportResult, TargetField,
};
use crate::app::services::import_executor::ProgressObserver;
use crate::app::services::row_parser::{RowParser, SegmentKeywords};
use crate::app::services::validator::validate_row;
use crate::constants::ORGANIZATIONS_TABLE;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Mutex;

mod progress_tests;

/// Candidate from organization and contact names; blank org means invalid
pub fn candidate(row_number: usize, organization: &str, contacts: &[&str]) -> CandidateRow {
    let mut mappings = vec![FieldMapping::automatic(
        "Company",
        TargetField::OrganizationName,
        90,
    )];
    let mut pairs = vec![("Company".to_string(), organization.to_string())];

    // one contact per row through the parser, extra contacts appended
    if let Some(first) = contacts.first() {
        mappings.push(FieldMapping::automatic("Contact", TargetField::ContactName, 88));
        pairs.push(("Contact".to_string(), first.to_string()));
    }

    let row = CsvRow::from_pairs(row_number, pairs);
    let mut parsed = RowParser::new(&mappings, SegmentKeywords::builtin()).parse(&row);
    for extra in contacts.iter().skip(1) {
        let mut contact = parsed.contacts[0].clone();
        contact.first_name = extra.to_string();
        contact.last_name = String::new();
        parsed.contacts.push(contact);
    }

    CandidateRow {
        parsed,
        validation: validate_row(&row, &mappings),
        duplicate: false,
    }
}

/// Mark a candidate as an existing organization
pub fn duplicate(mut candidate: CandidateRow) -> CandidateRow {
    candidate.duplicate = true;
    candidate
}

/// In-memory store that rejects inserts for chosen names
pub struct RejectingStore {
    pub inner: InMemoryStore,
    reject: HashSet<String>,
    pub insert_calls: Mutex<Vec<String>>,
}

impl RejectingStore {
    pub fn new(reject: &[&str]) -> Self {
        Self {
            inner: InMemoryStore::new(),
            reject: reject.iter().map(|s| s.to_string()).collect(),
            insert_calls: Mutex::new(Vec::new()),
        }
    }

    fn record_name(record: &Record) -> String {
        ["name", "first_name"]
            .iter()
            .find_map(|key| record.get(*key).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl RecordStore for RejectingStore {
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Record>> {
        self.inner.select(table, filter).await
    }

    async fn insert(&self, table: &str, record: Record) -> Result<RecordId> {
        let name = Self::record_name(&record);
        self.insert_calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", table, name));

        if self.reject.contains(&name) {
            return Err(Error::store(table, format!("constraint violation for '{}'", name)));
        }
        self.inner.insert(table, record).await
    }
}

/// Observer that records every event
#[derive(Default)]
pub struct RecordingProgress {
    pub started: Mutex<Option<usize>>,
    pub positions: Mutex<Vec<(usize, usize)>>,
    pub finished: Mutex<bool>,
}

impl ProgressObserver for RecordingProgress {
    fn on_start(&self, total: usize) {
        *self.started.lock().unwrap() = Some(total);
    }

    fn on_progress(&self, processed: usize, total: usize) {
        self.positions.lock().unwrap().push((processed, total));
    }

    fn on_finish(&self, _result: &ImportResult) {
        *self.finished.lock().unwrap() = true;
    }
}

/// Organization names currently in a store
pub async fn stored_organization_names(store: &dyn RecordStore) -> Vec<String> {
    store
        .select(ORGANIZATIONS_TABLE, &Filter::All)
        .await
        .unwrap()
        .iter()
        .filter_map(|r| r.get("name").and_then(Value::as_str).map(str::to_string))
        .collect()
}
