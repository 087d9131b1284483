//! Reports produced by the pipeline

use crate::app::models::{CandidateRow, FieldMapping, ImportResult, ValidationIssue, ValidationResult};
use serde::Serialize;

/// What an import would do, computed without writing
#[derive(Debug, Clone, Serialize)]
pub struct ImportPreview {
    /// Source name of the CSV input
    pub source: String,

    /// Final mappings, overrides applied
    pub mappings: Vec<FieldMapping>,

    /// Mapping-level checks; any error refuses the import
    pub batch_validation: ValidationResult,

    /// Parsed and validated rows in file order
    pub candidates: Vec<CandidateRow>,
}

impl ImportPreview {
    /// Whether the import would be allowed to start
    pub fn can_import(&self) -> bool {
        self.batch_validation.is_valid()
    }

    /// Rows that would be written
    pub fn valid_rows(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| c.validation.is_valid())
            .count()
    }

    /// Rows that would be skipped as invalid
    pub fn invalid_rows(&self) -> usize {
        self.candidates.len() - self.valid_rows()
    }

    /// Contacts parsed across all rows
    pub fn contact_count(&self) -> usize {
        self.candidates
            .iter()
            .map(|c| c.parsed.contacts.len())
            .sum()
    }

    /// Every row-level error and warning, in row order
    pub fn row_issues(&self) -> impl Iterator<Item = (&ValidationIssue, bool)> {
        self.candidates.iter().flat_map(|c| {
            c.validation
                .errors
                .iter()
                .map(|issue| (issue, true))
                .chain(c.validation.warnings.iter().map(|issue| (issue, false)))
        })
    }
}

/// Result of a completed import run
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub source: String,
    pub mappings: Vec<FieldMapping>,

    /// Non-blocking mapping warnings
    pub mapping_warnings: Vec<ValidationIssue>,

    /// Blocking row errors; each row listed here was skipped as invalid
    pub row_errors: Vec<ValidationIssue>,

    /// Non-blocking row warnings, e.g. malformed emails
    pub row_warnings: Vec<ValidationIssue>,

    pub result: ImportResult,

    /// One-line human summary of `result`
    pub summary: String,
}
