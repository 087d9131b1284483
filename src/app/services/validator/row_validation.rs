//! Per-row validation

use crate::app::models::{
    CsvRow, FieldMapping, TargetField, ValidationIssue, ValidationResult, column_for,
};
use crate::constants::EMAIL_PATTERN;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).unwrap());

/// Whether a value looks like `local@domain.tld`
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// Check one raw row against the mappings
///
/// A blank or unmapped organization name is an error. Each mapped email
/// column holding a malformed address adds a warning.
pub fn validate_row(row: &CsvRow, mappings: &[FieldMapping]) -> ValidationResult {
    let mut result = ValidationResult::new();

    match column_for(mappings, TargetField::OrganizationName) {
        Some(column) => {
            if row.get_trimmed(column).is_none() {
                result.add_error(
                    ValidationIssue::for_field(
                        TargetField::OrganizationName,
                        format!("Row {}: organization name is blank", row.row_number),
                    )
                    .with_column(column),
                );
            }
        }
        None => result.add_error(ValidationIssue::for_field(
            TargetField::OrganizationName,
            format!("Row {}: no column maps to organization name", row.row_number),
        )),
    }

    for mapping in mappings {
        let Some(field) = mapping.field().filter(TargetField::is_email) else {
            continue;
        };
        if let Some(value) = row.get_trimmed(&mapping.csv_column) {
            if !is_valid_email(value) {
                result.add_warning(
                    ValidationIssue::for_field(
                        field,
                        format!(
                            "Row {}: '{}' is not a valid email address",
                            row.row_number, value
                        ),
                    )
                    .with_column(mapping.csv_column.clone()),
                );
            }
        }
    }

    result
}
