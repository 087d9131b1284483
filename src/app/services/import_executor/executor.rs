//! Sequential record writer

use super::progress::ProgressObserver;
use crate::app::adapters::store::{Record, RecordId, RecordStore};
use crate::app::models::{
    CandidateRow, EntityKind, ImportResult, ImportState, RowFailure, RowSkip, SkipReason,
};
use crate::constants::{CONTACTS_TABLE, ORGANIZATIONS_TABLE};
use crate::{Error, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Prepared candidates for one import run
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pub candidates: Vec<CandidateRow>,

    /// The duplicate lookup failed before this batch was built
    pub duplicate_check_unavailable: bool,
}

impl ImportBatch {
    pub fn new(candidates: Vec<CandidateRow>) -> Self {
        Self {
            candidates,
            duplicate_check_unavailable: false,
        }
    }

    /// Organization candidates plus contact candidates
    pub fn total_records(&self) -> usize {
        self.candidates
            .iter()
            .map(|c| 1 + c.parsed.contacts.len())
            .sum()
    }
}

/// Writes a batch to the store one record at a time
///
/// Organizations are written first. Contacts follow and are only written
/// when their organization was created in the same run. A rejected write is
/// recorded against its row and the executor moves on.
pub struct ImportExecutor {
    store: Arc<dyn RecordStore>,
    state: ImportState,
}

impl ImportExecutor {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            state: ImportState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ImportState {
        self.state
    }

    /// Run the import
    ///
    /// An executor runs once: calling this outside the idle state is an
    /// error and writes nothing.
    pub async fn execute(
        &mut self,
        batch: &ImportBatch,
        progress: &dyn ProgressObserver,
    ) -> Result<ImportResult> {
        if self.state != ImportState::Idle {
            return Err(Error::executor_state(self.state.as_str()));
        }
        self.state = ImportState::Importing;

        let mut result = ImportResult::new();
        result.state = ImportState::Importing;
        result.duplicate_check_unavailable = batch.duplicate_check_unavailable;

        let total = batch.total_records();
        let mut processed = 0;
        info!(
            "Importing {} rows ({} records)",
            batch.candidates.len(),
            total
        );
        progress.on_start(total);

        progress.on_phase(EntityKind::Organization);
        let organization_ids = self
            .write_organizations(batch, &mut result, &mut processed, total, progress)
            .await;

        progress.on_phase(EntityKind::Contact);
        self.write_contacts(
            batch,
            &organization_ids,
            &mut result,
            &mut processed,
            total,
            progress,
        )
        .await;

        self.state = if result.has_failures() {
            ImportState::FailedWithPartialResults
        } else {
            ImportState::Completed
        };
        result.state = self.state;
        result.finished_at = Some(Utc::now());

        info!(
            "Import {}: {} organizations and {} contacts created",
            self.state, result.organizations.created, result.contacts.created
        );
        progress.on_finish(&result);

        Ok(result)
    }

    /// Write organizations; returns candidate index to created id
    async fn write_organizations(
        &self,
        batch: &ImportBatch,
        result: &mut ImportResult,
        processed: &mut usize,
        total: usize,
        progress: &dyn ProgressObserver,
    ) -> HashMap<usize, RecordId> {
        let mut created = HashMap::new();
        result.organizations.submitted = batch.candidates.len();

        for (index, candidate) in batch.candidates.iter().enumerate() {
            let row_number = candidate.parsed.row_number;
            let organization = &candidate.parsed.organization;

            if !candidate.validation.is_valid() {
                result.organizations.skipped += 1;
                result.skipped_rows.push(RowSkip {
                    row_number,
                    entity: EntityKind::Organization,
                    name: organization.name.clone(),
                    reason: SkipReason::Invalid,
                    detail: Some(candidate.validation.error_summary()),
                });
            } else if candidate.duplicate {
                result.organizations.skipped += 1;
                result.skipped_rows.push(RowSkip {
                    row_number,
                    entity: EntityKind::Organization,
                    name: organization.name.clone(),
                    reason: SkipReason::Duplicate,
                    detail: None,
                });
            } else {
                match self.insert(ORGANIZATIONS_TABLE, organization, None).await {
                    Ok(id) => {
                        debug!(
                            "Row {}: created organization '{}' (id {})",
                            row_number, organization.name, id
                        );
                        result.organizations.created += 1;
                        created.insert(index, id);
                    }
                    Err(e) => {
                        warn!(
                            "Row {}: failed to create organization '{}': {}",
                            row_number, organization.name, e
                        );
                        result.organizations.failed.push(RowFailure {
                            row_number,
                            entity: EntityKind::Organization,
                            name: organization.name.clone(),
                            message: e.to_string(),
                        });
                    }
                }
            }

            *processed += 1;
            progress.on_progress(*processed, total);
        }

        created
    }

    async fn write_contacts(
        &self,
        batch: &ImportBatch,
        organization_ids: &HashMap<usize, RecordId>,
        result: &mut ImportResult,
        processed: &mut usize,
        total: usize,
        progress: &dyn ProgressObserver,
    ) {
        for (index, candidate) in batch.candidates.iter().enumerate() {
            let row_number = candidate.parsed.row_number;

            for contact in &candidate.parsed.contacts {
                result.contacts.submitted += 1;
                let name = contact.display_name();

                match organization_ids.get(&index) {
                    Some(organization_id) => {
                        match self
                            .insert(CONTACTS_TABLE, contact, Some(*organization_id))
                            .await
                        {
                            Ok(id) => {
                                debug!("Row {}: created contact '{}' (id {})", row_number, name, id);
                                result.contacts.created += 1;
                            }
                            Err(e) => {
                                warn!(
                                    "Row {}: failed to create contact '{}': {}",
                                    row_number, name, e
                                );
                                result.contacts.failed.push(RowFailure {
                                    row_number,
                                    entity: EntityKind::Contact,
                                    name,
                                    message: e.to_string(),
                                });
                            }
                        }
                    }
                    None => {
                        result.contacts.skipped += 1;
                        result.skipped_rows.push(RowSkip {
                            row_number,
                            entity: EntityKind::Contact,
                            name,
                            reason: SkipReason::ParentNotImported,
                            detail: Some(format!(
                                "organization '{}' was not created",
                                contact.organization_name
                            )),
                        });
                    }
                }

                *processed += 1;
                progress.on_progress(*processed, total);
            }
        }
    }

    async fn insert<T: Serialize>(
        &self,
        table: &str,
        value: &T,
        organization_id: Option<RecordId>,
    ) -> Result<RecordId> {
        let mut record = to_record(table, value)?;
        if let Some(id) = organization_id {
            record.insert("organization_id".to_string(), Value::from(id));
        }
        self.store.insert(table, record).await
    }
}

fn to_record<T: Serialize>(table: &str, value: &T) -> Result<Record> {
    match serde_json::to_value(value)? {
        Value::Object(record) => Ok(record),
        _ => Err(Error::store(table, "record must serialize to a JSON object")),
    }
}
