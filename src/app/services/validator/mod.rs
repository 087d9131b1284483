//! Row, batch and duplicate validation for CRM imports
//!
//! Validation outcomes are data: every check returns a
//! [`ValidationResult`](crate::app::models::ValidationResult) and never an
//! `Err`. Errors block a row (or, at batch level, the whole import);
//! warnings are reported and never block.
//!
//! ## Architecture
//!
//! - [`row_validation`] - Per-row checks on raw values
//! - [`batch_validation`] - Mapping completeness and confidence checks
//! - [`duplicates`] - Existing-organization lookup against the store (fail-open)

pub mod batch_validation;
pub mod duplicates;
pub mod row_validation;

#[cfg(test)]
pub mod tests;

pub use batch_validation::validate_mappings;
pub use duplicates::{DuplicateCheck, check_duplicates, find_existing_organizations, mark_duplicates};
pub use row_validation::{is_valid_email, validate_row};
