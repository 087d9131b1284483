//! Whole-batch mapping checks
//!
//! These run once, before any row is parsed. An error here refuses the
//! import before a single write.

use crate::app::models::{FieldMapping, TargetField, ValidationIssue, ValidationResult};
use std::collections::BTreeMap;
use tracing::warn;

/// Check a mapping set for completeness and confidence
///
/// - no column mapped to `organization_name` is an error
/// - fields mapped by two or more columns are an error naming the fields
/// - a non-overridden mapping below `low_confidence_threshold` is a warning
pub fn validate_mappings(mappings: &[FieldMapping], low_confidence_threshold: u8) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut columns_by_field: BTreeMap<TargetField, Vec<&str>> = BTreeMap::new();
    for mapping in mappings {
        if let Some(field) = mapping.field() {
            columns_by_field
                .entry(field)
                .or_default()
                .push(mapping.csv_column.as_str());
        }
    }

    if !columns_by_field.contains_key(&TargetField::OrganizationName) {
        result.add_error(ValidationIssue::for_field(
            TargetField::OrganizationName,
            "No column is mapped to organization_name",
        ));
    }

    let duplicated: Vec<String> = columns_by_field
        .iter()
        .filter(|(_, columns)| columns.len() > 1)
        .map(|(field, columns)| format!("{} ({})", field, columns.join(", ")))
        .collect();
    if !duplicated.is_empty() {
        result.add_error(ValidationIssue::new(format!(
            "Fields mapped by more than one column: {}",
            duplicated.join("; ")
        )));
    }

    for mapping in mappings {
        let Some(field) = mapping.field() else {
            continue;
        };
        if !mapping.user_overridden && mapping.confidence < low_confidence_threshold {
            warn!(
                "Low confidence mapping: '{}' -> {} ({})",
                mapping.csv_column, field, mapping.confidence
            );
            result.add_warning(
                ValidationIssue::for_field(
                    field,
                    format!(
                        "Column '{}' mapped to {} with low confidence ({}%)",
                        mapping.csv_column, field, mapping.confidence
                    ),
                )
                .with_column(mapping.csv_column.clone()),
            );
        }
    }

    result
}
