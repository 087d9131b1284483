//! CRM Importer Library
//!
//! A Rust library for importing organizations and contacts into a CRM from
//! arbitrary CSV exports.
//!
//! This library provides tools for:
//! - Reading UTF-8 CSV text into raw rows keyed by column header
//! - Matching arbitrary column headers to known fields with ranked synonyms
//! - Parsing rows into candidate organizations and contacts (name splitting,
//!   segment, type and priority inference)
//! - Validating rows and whole mapping sets, and detecting duplicates
//! - Writing accepted records sequentially with progress and per-row failures

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_reader;
        pub mod field_mapper;
        pub mod import_executor;
        pub mod import_pipeline;
        pub mod row_parser;
        pub mod validator;
    }
    pub mod adapters {
        pub mod json_store;
        pub mod memory_store;
        pub mod store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    CsvRow, FieldMapping, ImportResult, MappingTarget, ParsedContact, ParsedOrganization,
    TargetField, ValidationResult,
};
pub use config::ImportConfig;

/// Result type alias for the CRM importer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for import operations
///
/// Validation problems are never reported through this type; they are
/// returned as data in [`ValidationResult`]. The one exception is a batch
/// that fails mapping validation, which refuses the whole import before any
/// write happens.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in '{source_name}': {message}")]
    CsvParsing {
        source_name: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Input had no header row
    #[error("CSV input '{source_name}' has no header row")]
    MissingHeaders { source_name: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Invalid field mapping override
    #[error("Invalid field mapping: {message}")]
    InvalidMapping { message: String },

    /// Batch refused before any write
    #[error("Import refused: {}", issues.join("; "))]
    BatchRejected { issues: Vec<String> },

    /// Backing store failure
    #[error("Store error on table '{table}': {message}")]
    Store { table: String, message: String },

    /// Record serialization failure
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Executor used outside its lifecycle
    #[error("Import executor is {state}, expected idle")]
    ExecutorState { state: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        source_name: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            source_name: source_name.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a missing headers error
    pub fn missing_headers(source_name: impl Into<String>) -> Self {
        Self::MissingHeaders {
            source_name: source_name.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid mapping error
    pub fn invalid_mapping(message: impl Into<String>) -> Self {
        Self::InvalidMapping {
            message: message.into(),
        }
    }

    /// Create a batch rejection from the blocking issues
    pub fn batch_rejected(issues: Vec<String>) -> Self {
        Self::BatchRejected { issues }
    }

    /// Create a store error
    pub fn store(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create an executor lifecycle error
    pub fn executor_state(state: impl Into<String>) -> Self {
        Self::ExecutorState {
            state: state.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            source_name: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON conversion failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid TOML: {}", error),
        }
    }
}
