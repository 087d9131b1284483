//! Header-to-field mapping for arbitrary CSV exports
//!
//! This module matches CSV column headers to the known CRM fields using a
//! ranked synonym table, producing exactly one [`FieldMapping`] per header.
//!
//! ## Architecture
//!
//! - [`synonyms`] - The synonym table, an explicit value built from the
//!   built-in constants plus configuration
//! - [`scoring`] - Header normalization and the pure ranking function
//! - [`mapper`] - Greedy one-to-one assignment and user overrides
//!
//! ## Usage
//!
//! ```rust
//! use crm_importer::app::models::{MappingTarget, TargetField};
//! use crm_importer::app::services::field_mapper::{FieldMapper, SynonymTable};
//!
//! let mapper = FieldMapper::new(SynonymTable::builtin());
//! let headers = vec!["Company Name".to_string(), "xyz123".to_string()];
//! let mappings = mapper.map_headers(&headers);
//!
//! assert_eq!(mappings[0].target, MappingTarget::Field(TargetField::OrganizationName));
//! assert_eq!(mappings[1].target, MappingTarget::Skip);
//! ```
//!
//! [`FieldMapping`]: crate::app::models::FieldMapping

pub mod mapper;
pub mod scoring;
pub mod synonyms;

#[cfg(test)]
pub mod tests;

pub use mapper::{FieldMapper, MappingCandidate, apply_override, parse_override};
pub use scoring::{MatchKind, MatchScore, normalize_header, score_field};
pub use synonyms::SynonymTable;
