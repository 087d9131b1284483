//! Backing store seam
//!
//! The import pipeline treats the record store as an opaque remote service
//! exposing `select` and `insert`. Connection handling, transactions and
//! schema belong to the implementation, not to the pipeline.

use crate::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A stored record: a flat JSON object
pub type Record = Map<String, Value>;

/// Identifier assigned by the store on insert
pub type RecordId = u64;

/// Row filter for `select`
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every row of the table
    All,

    /// Rows whose string column equals one of the values, ignoring case
    ColumnInIgnoreCase { column: String, values: Vec<String> },
}

impl Filter {
    /// Case-insensitive membership filter
    pub fn column_in_ignore_case(
        column: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Filter::ColumnInIgnoreCase {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a record passes the filter
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::All => true,
            Filter::ColumnInIgnoreCase { column, values } => record
                .get(column)
                .and_then(Value::as_str)
                .map(|value| {
                    let value = value.to_lowercase();
                    values.iter().any(|v| v.to_lowercase() == value)
                })
                .unwrap_or(false),
        }
    }
}

/// Store that accepts or rejects each write on its own
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the records of a table that pass the filter
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Record>>;

    /// Insert one record and return its new id
    async fn insert(&self, table: &str, record: Record) -> Result<RecordId>;
}
