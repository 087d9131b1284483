//! Test utilities for the CSV reader

use std::io::Write;
use tempfile::NamedTempFile;


/// Helper to create a temporary file with given content
pub fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
