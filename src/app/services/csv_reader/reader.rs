//! CSV text parsing into header-keyed rows

use crate::app::models::CsvRow;
use crate::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parsed CSV input: unique headers plus data rows
#[derive(Debug, Clone, PartialEq)]
pub struct CsvDocument {
    /// Column headers in file order, made unique
    pub headers: Vec<String>,

    /// Data rows, blank lines dropped
    pub rows: Vec<CsvRow>,
}

impl CsvDocument {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// CSV reader with import-friendly defaults
#[derive(Debug, Clone)]
pub struct CsvReader {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Name used in error messages
    source_name: String,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            source_name: "<input>".to_string(),
        }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Name the input for error messages
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Read and parse a CSV file
    pub async fn read_file(&self, path: &Path) -> Result<CsvDocument> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read '{}'", path.display()), e))?;

        self.clone()
            .with_source_name(path.display().to_string())
            .read_str(&content)
    }

    /// Parse CSV content from a string
    pub fn read_str(&self, content: &str) -> Result<CsvDocument> {
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true) // Allow rows with different lengths
            .trim(Trim::None)
            .from_reader(content.as_bytes());

        let raw_headers = reader
            .headers()
            .map_err(|e| {
                Error::csv_parsing(&self.source_name, "Failed to read header row", Some(e))
            })?
            .clone();

        if raw_headers.iter().all(|h| h.trim().is_empty()) {
            return Err(Error::missing_headers(&self.source_name));
        }

        let headers = unique_headers(&raw_headers);
        let mut rows = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let row_number = index + 1;
            let record = result.map_err(|e| {
                Error::csv_parsing(
                    &self.source_name,
                    format!("Failed to parse data row {}", row_number),
                    Some(e),
                )
            })?;

            if record.iter().all(|cell| cell.trim().is_empty()) {
                debug!("Skipping blank data row {}", row_number);
                continue;
            }

            if record.len() > headers.len() {
                debug!(
                    "Data row {} has {} cells for {} headers; extra cells ignored",
                    row_number,
                    record.len(),
                    headers.len()
                );
            }

            rows.push(build_row(row_number, &headers, &record));
        }

        debug!(
            "Read {} data rows with {} columns from {}",
            rows.len(),
            headers.len(),
            self.source_name
        );

        Ok(CsvDocument { headers, rows })
    }
}

/// Trim headers, name blank ones and suffix repeats so every column is addressable
fn unique_headers(raw: &StringRecord) -> Vec<String> {
    let mut seen = HashSet::new();

    raw.iter()
        .enumerate()
        .map(|(index, header)| {
            let base = match header.trim() {
                "" => format!("Column {}", index + 1),
                trimmed => trimmed.to_string(),
            };

            let mut candidate = base.clone();
            let mut occurrence = 1;
            while !seen.insert(candidate.clone()) {
                occurrence += 1;
                candidate = format!("{} ({})", base, occurrence);
            }
            candidate
        })
        .collect()
}

/// Pair cells with headers; missing trailing cells read as blank
fn build_row(row_number: usize, headers: &[String], record: &StringRecord) -> CsvRow {
    let values: HashMap<String, String> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            (
                header.clone(),
                record.get(index).unwrap_or_default().to_string(),
            )
        })
        .collect();

    CsvRow::new(row_number, values)
}
