//! Synonym table passed into the field mapper

use super::scoring::normalize_header;
use crate::Result;
use crate::app::models::TargetField;
use crate::config::MappingConfig;
use crate::constants::DEFAULT_SYNONYMS;

/// Ordered header synonyms per target field
///
/// Synonyms are stored normalized. Position in each list is the synonym's
/// rank: earlier entries win ties.
#[derive(Debug, Clone, PartialEq)]
pub struct SynonymTable {
    entries: Vec<(TargetField, Vec<String>)>,
}

impl SynonymTable {
    /// Table with no synonyms; only exact field keys match
    pub fn empty() -> Self {
        Self {
            entries: TargetField::ALL
                .iter()
                .map(|field| (*field, Vec::new()))
                .collect(),
        }
    }

    /// Table built from the built-in constants
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (key, synonyms) in DEFAULT_SYNONYMS {
            if let Some(field) = TargetField::ALL.iter().find(|f| f.as_str() == *key) {
                table = table.with_synonyms(*field, synonyms);
            }
        }
        table
    }

    /// Built-in table extended with configured synonyms
    pub fn from_config(config: &MappingConfig) -> Result<Self> {
        let mut table = Self::builtin();
        for (key, synonyms) in &config.extra_synonyms {
            let field: TargetField = key.parse()?;
            let synonyms: Vec<&str> = synonyms.iter().map(String::as_str).collect();
            table = table.with_synonyms(field, &synonyms);
        }
        Ok(table)
    }

    /// Append synonyms for a field, after any existing ones
    pub fn with_synonyms(mut self, field: TargetField, synonyms: &[&str]) -> Self {
        if let Some((_, list)) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            for synonym in synonyms {
                let normalized = normalize_header(synonym);
                if !normalized.is_empty() && !list.contains(&normalized) {
                    list.push(normalized);
                }
            }
        }
        self
    }

    /// Synonyms for a field in rank order
    pub fn synonyms(&self, field: TargetField) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    /// Fields with their synonyms in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (TargetField, &[String])> {
        self.entries
            .iter()
            .map(|(field, list)| (*field, list.as_slice()))
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::builtin()
    }
}
