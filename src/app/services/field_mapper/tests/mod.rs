//! Tests for header-to-field mapping

use crate::app::models::FieldMapping;


/// Helper to turn string literals into owned headers
pub fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Mapping for a column by name
pub fn mapping_for<'a>(mappings: &'a [FieldMapping], column: &str) -> &'a FieldMapping {
    mappings
        .iter()
        .find(|m| m.csv_column == column)
        .unwrap_or_else(|| panic!("no mapping for column {}", column))
}
