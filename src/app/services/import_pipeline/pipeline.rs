//! Import pipeline over one CSV document

use super::report::{ImportOutcome, ImportPreview};
use crate::app::adapters::store::RecordStore;
use crate::app::models::{CandidateRow, FieldMapping, MappingTarget};
use crate::app::services::csv_reader::CsvDocument;
use crate::app::services::field_mapper::{FieldMapper, SynonymTable, apply_override};
use crate::app::services::import_executor::{
    ImportBatch, ImportExecutor, ProgressObserver, format_summary,
};
use crate::app::services::row_parser::{RowParser, SegmentKeywords};
use crate::app::services::validator::{
    check_duplicates, mark_duplicates, validate_mappings, validate_row,
};
use crate::config::ImportConfig;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configured pipeline ready to preview or import documents
#[derive(Debug, Clone)]
pub struct ImportPipeline {
    config: ImportConfig,
    mapper: FieldMapper,
    keywords: SegmentKeywords,
    overrides: Vec<(String, MappingTarget)>,
}

impl ImportPipeline {
    /// Build the pipeline from validated configuration
    pub fn new(config: ImportConfig) -> Result<Self> {
        config.validate()?;

        let mapper = FieldMapper::new(SynonymTable::from_config(&config.mapping)?);
        let keywords = SegmentKeywords::from_config(&config.classification);

        Ok(Self {
            config,
            mapper,
            keywords,
            overrides: Vec::new(),
        })
    }

    /// Add a user override applied after automatic mapping
    pub fn with_override(mut self, column: impl Into<String>, target: MappingTarget) -> Self {
        self.overrides.push((column.into(), target));
        self
    }

    /// Add several overrides in order; later ones win for the same column
    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (String, MappingTarget)>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Automatic mappings with every override applied
    pub fn map_headers(&self, headers: &[String]) -> Result<Vec<FieldMapping>> {
        let mut mappings = self.mapper.map_headers(headers);
        for (column, target) in &self.overrides {
            apply_override(&mut mappings, column, *target)?;
        }
        Ok(mappings)
    }

    /// Map, validate and parse without touching a store
    pub fn preview(&self, document: &CsvDocument, source: &str) -> Result<ImportPreview> {
        let mappings = self.map_headers(&document.headers)?;
        let batch_validation =
            validate_mappings(&mappings, self.config.mapping.low_confidence_threshold);

        let candidates = if batch_validation.is_valid() {
            self.build_candidates(document, &mappings)
        } else {
            Vec::new()
        };

        Ok(ImportPreview {
            source: source.to_string(),
            mappings,
            batch_validation,
            candidates,
        })
    }

    /// Run the full import into a store
    ///
    /// Fails with [`Error::BatchRejected`] before any write when the mapping
    /// set has errors. Row problems and rejected writes are reported in the
    /// outcome, not as errors.
    pub async fn run(
        &self,
        document: &CsvDocument,
        source: &str,
        store: Arc<dyn RecordStore>,
        progress: &dyn ProgressObserver,
    ) -> Result<ImportOutcome> {
        info!(
            "Starting import of {} rows from {}",
            document.row_count(),
            source
        );

        let preview = self.preview(document, source)?;
        if !preview.can_import() {
            let issues: Vec<String> = preview
                .batch_validation
                .errors
                .iter()
                .map(|issue| issue.message.clone())
                .collect();
            warn!("Import refused: {}", issues.join("; "));
            return Err(Error::batch_rejected(issues));
        }

        let ImportPreview {
            source,
            mappings,
            batch_validation,
            mut candidates,
        } = preview;

        let duplicate_check_unavailable = if self.config.import.skip_duplicates {
            self.flag_duplicates(store.as_ref(), &mut candidates).await
        } else {
            debug!("Duplicate check disabled");
            false
        };

        let row_errors = candidates
            .iter()
            .flat_map(|c| c.validation.errors.iter().cloned())
            .collect();
        let row_warnings = candidates
            .iter()
            .flat_map(|c| c.validation.warnings.iter().cloned())
            .collect();

        let batch = ImportBatch {
            candidates,
            duplicate_check_unavailable,
        };
        let mut executor = ImportExecutor::new(store);
        let result = executor.execute(&batch, progress).await?;
        let summary = format_summary(&result);
        info!("{}", summary);

        Ok(ImportOutcome {
            source,
            mappings,
            mapping_warnings: batch_validation.warnings,
            row_errors,
            row_warnings,
            result,
            summary,
        })
    }

    fn build_candidates(&self, document: &CsvDocument, mappings: &[FieldMapping]) -> Vec<CandidateRow> {
        let parser = RowParser::new(mappings, self.keywords.clone());

        let candidates: Vec<CandidateRow> = document
            .rows
            .iter()
            .map(|row| CandidateRow {
                parsed: parser.parse(row),
                validation: validate_row(row, mappings),
                duplicate: false,
            })
            .collect();

        let invalid = candidates
            .iter()
            .filter(|c| !c.validation.is_valid())
            .count();
        info!(
            "Parsed {} rows ({} invalid)",
            candidates.len(),
            invalid
        );

        candidates
    }

    /// Flag duplicates; returns whether the store lookup failed
    async fn flag_duplicates(&self, store: &dyn RecordStore, candidates: &mut [CandidateRow]) -> bool {
        let names: Vec<String> = candidates
            .iter()
            .filter(|c| c.validation.is_valid())
            .map(|c| c.parsed.organization.name.clone())
            .collect();

        let check = check_duplicates(store, &names).await;
        let flagged = mark_duplicates(candidates, &check);
        info!("Flagged {} duplicate organizations", flagged);

        check.lookup_failed
    }
}
