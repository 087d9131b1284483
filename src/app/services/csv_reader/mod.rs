//! CSV input reader for CRM imports
//!
//! Turns user-supplied CSV text (UTF-8, comma-delimited, first row headers)
//! into raw [`CsvRow`](crate::app::models::CsvRow) values keyed by header.
//!
//! ## Usage
//!
//! ```rust
//! use crm_importer::app::services::csv_reader::CsvReader;
//!
//! # fn example() -> crm_importer::Result<()> {
//! let document = CsvReader::new().read_str("Company,Email\nAcme,ops@acme.test\n")?;
//!
//! assert_eq!(document.headers, vec!["Company", "Email"]);
//! assert_eq!(document.rows[0].get("Company"), Some("Acme"));
//! # Ok(())
//! # }
//! ```

pub mod reader;

#[cfg(test)]
pub mod tests;

pub use reader::{CsvDocument, CsvReader};
