//! Row parsing from raw CSV rows into candidate records
//!
//! This module turns a [`CsvRow`] plus the column mappings into one
//! organization candidate and zero or one contact candidate. Parsing never
//! fails: blank or odd values fall back to defaults and validation decides
//! later whether the row is usable.
//!
//! ## Architecture
//!
//! - [`parser`] - Row-level orchestration over the column mappings
//! - [`name_split`] - Full-name splitting ("Last, First" or "First Last")
//! - [`classification`] - Segment, organization type and priority inference
//!
//! ## Usage
//!
//! ```rust
//! use crm_importer::app::models::{CsvRow, FieldMapping, Segment, TargetField};
//! use crm_importer::app::services::row_parser::{RowParser, SegmentKeywords};
//!
//! let mappings = vec![
//!     FieldMapping::automatic("Company", TargetField::OrganizationName, 89),
//!     FieldMapping::automatic("Contact", TargetField::ContactName, 88),
//! ];
//! let parser = RowParser::new(&mappings, SegmentKeywords::builtin());
//!
//! let row = CsvRow::from_pairs(1, [("Company", "Tony's Pizzeria"), ("Contact", "Smith, John")]);
//! let parsed = parser.parse(&row);
//!
//! assert_eq!(parsed.organization.segment, Segment::Restaurant);
//! assert_eq!(parsed.contacts[0].first_name, "John");
//! ```
//!
//! [`CsvRow`]: crate::app::models::CsvRow

pub mod classification;
pub mod name_split;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use classification::{SegmentKeywords, detect_organization_type, normalize_priority};
pub use name_split::{SplitName, split_full_name};
pub use parser::RowParser;
