//! One-to-one assignment of CSV headers to target fields

use super::scoring::{MatchScore, normalize_header, score_field};
use super::synonyms::SynonymTable;
use crate::app::models::{FieldMapping, MappingTarget, TargetField};
use crate::constants::scores;
use crate::{Error, Result};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info};

/// A scored (header, field) pair before assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingCandidate {
    pub header_index: usize,
    pub field: TargetField,
    pub score: MatchScore,
}

impl MappingCandidate {
    /// Stable ranking order: score desc, field declaration, synonym rank, header position
    fn ranking(&self, other: &Self) -> Ordering {
        other
            .score
            .score
            .cmp(&self.score.score)
            .then_with(|| {
                self.field
                    .declaration_index()
                    .cmp(&other.field.declaration_index())
            })
            .then_with(|| self.score.rank.cmp(&other.score.rank))
            .then_with(|| self.header_index.cmp(&other.header_index))
    }
}

/// Field mapper over an explicit synonym table
///
/// Mapping is a pure function of the headers and the table.
#[derive(Debug, Clone, Default)]
pub struct FieldMapper {
    synonyms: SynonymTable,
}

impl FieldMapper {
    pub fn new(synonyms: SynonymTable) -> Self {
        Self { synonyms }
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Every positive (header, field) score, best first
    pub fn candidates(&self, headers: &[String]) -> Vec<MappingCandidate> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let mut candidates: Vec<MappingCandidate> = normalized
            .iter()
            .enumerate()
            .flat_map(|(header_index, header)| {
                self.synonyms.iter().filter_map(move |(field, synonyms)| {
                    score_field(header, field, synonyms).map(|score| MappingCandidate {
                        header_index,
                        field,
                        score,
                    })
                })
            })
            .collect();

        candidates.sort_by(MappingCandidate::ranking);
        candidates
    }

    /// Map every header to at most one field
    ///
    /// Candidates are taken greedily in ranking order; a header or field
    /// already used is not assigned again. Headers left over map to skip.
    /// Output is in header order.
    pub fn map_headers(&self, headers: &[String]) -> Vec<FieldMapping> {
        let mut mappings: Vec<FieldMapping> =
            headers.iter().map(|h| FieldMapping::skip(h.clone())).collect();
        let mut assigned_headers = HashSet::new();
        let mut assigned_fields = HashSet::new();

        for candidate in self.candidates(headers) {
            if assigned_headers.contains(&candidate.header_index)
                || assigned_fields.contains(&candidate.field)
            {
                continue;
            }

            assigned_headers.insert(candidate.header_index);
            assigned_fields.insert(candidate.field);

            let header = &headers[candidate.header_index];
            debug!(
                "Mapped column '{}' -> {} (confidence {}, {:?})",
                header, candidate.field, candidate.score.score, candidate.score.kind
            );
            mappings[candidate.header_index] =
                FieldMapping::automatic(header.clone(), candidate.field, candidate.score.score);
        }

        info!(
            "Mapped {} of {} columns to fields",
            assigned_headers.len(),
            headers.len()
        );

        mappings
    }
}

/// Replace the automatic guess for a column with a user choice
///
/// The column is matched exactly first, then by normalized header.
pub fn apply_override(
    mappings: &mut [FieldMapping],
    column: &str,
    target: MappingTarget,
) -> Result<()> {
    let wanted = normalize_header(column);
    let index = mappings
        .iter()
        .position(|m| m.csv_column == column)
        .or_else(|| {
            mappings
                .iter()
                .position(|m| normalize_header(&m.csv_column) == wanted)
        })
        .ok_or_else(|| Error::invalid_mapping(format!("No CSV column named '{}'", column)))?;
    let mapping = &mut mappings[index];

    debug!(
        "User override for column '{}': {} -> {}",
        mapping.csv_column, mapping.target, target
    );

    mapping.target = target;
    mapping.confidence = match target {
        MappingTarget::Field(_) => scores::USER_OVERRIDE,
        MappingTarget::Skip => 0,
    };
    mapping.user_overridden = true;
    Ok(())
}

/// Parse a `Column=field` override
///
/// The last `=` separates column from target, so column names may contain `=`.
pub fn parse_override(spec: &str) -> Result<(String, MappingTarget)> {
    let (column, target) = spec.rsplit_once('=').ok_or_else(|| {
        Error::invalid_mapping(format!(
            "Override '{}' must look like \"Column=field\"",
            spec
        ))
    })?;

    let column = column.trim();
    if column.is_empty() {
        return Err(Error::invalid_mapping(format!(
            "Override '{}' has no column name",
            spec
        )));
    }

    Ok((column.to_string(), target.parse()?))
}
