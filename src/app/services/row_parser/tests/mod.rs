//! Tests for row parsing

use crate::app::models::{FieldMapping, TargetField};

mod classification_tests;

/// Automatic mappings from (column, field) pairs
pub fn mappings(pairs: &[(&str, TargetField)]) -> Vec<FieldMapping> {
    pairs
        .iter()
        .map(|(column, field)| FieldMapping::automatic(*column, *field, 90))
        .collect()
}
