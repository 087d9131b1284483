//! Existing-organization lookup
//!
//! The lookup is fail-open: a store error is logged and treated as "no
//! duplicates found", so an unavailable store never blocks an import. The
//! failure is still reported through [`DuplicateCheck::lookup_failed`].

use crate::app::adapters::store::{Filter, RecordStore};
use crate::app::models::CandidateRow;
use crate::constants::{ORGANIZATION_NAME_COLUMN, ORGANIZATIONS_TABLE};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

/// Outcome of a duplicate lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateCheck {
    /// Lower-cased names that already exist
    pub existing: HashSet<String>,

    /// The store could not be queried and `existing` is empty
    pub lookup_failed: bool,
}

impl DuplicateCheck {
    /// Whether a name exists, ignoring case and surrounding whitespace
    pub fn contains(&self, name: &str) -> bool {
        self.existing.contains(&name.trim().to_lowercase())
    }
}

/// Look up which candidate names already exist in the store
pub async fn check_duplicates(store: &dyn RecordStore, names: &[String]) -> DuplicateCheck {
    let wanted: Vec<String> = names
        .iter()
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if wanted.is_empty() {
        return DuplicateCheck::default();
    }

    let filter = Filter::column_in_ignore_case(ORGANIZATION_NAME_COLUMN, wanted);
    match store.select(ORGANIZATIONS_TABLE, &filter).await {
        Ok(records) => {
            let existing: HashSet<String> = records
                .iter()
                .filter_map(|record| record.get(ORGANIZATION_NAME_COLUMN).and_then(Value::as_str))
                .map(|name| name.trim().to_lowercase())
                .collect();
            info!(
                "Duplicate check: {} of {} names already exist",
                existing.len(),
                names.len()
            );
            DuplicateCheck {
                existing,
                lookup_failed: false,
            }
        }
        Err(e) => {
            warn!(
                "Duplicate check unavailable, continuing without it: {}",
                e
            );
            DuplicateCheck {
                existing: HashSet::new(),
                lookup_failed: true,
            }
        }
    }
}

/// Lower-cased names from `names` that already exist; empty on lookup failure
pub async fn find_existing_organizations(
    store: &dyn RecordStore,
    names: &[String],
) -> HashSet<String> {
    check_duplicates(store, names).await.existing
}

/// Flag candidates that duplicate the store or an earlier row
///
/// Names compare case-insensitively after trimming; within the file the
/// earliest row wins. Rows without a name are left alone. Returns the
/// number of rows flagged.
pub fn mark_duplicates(candidates: &mut [CandidateRow], existing: &DuplicateCheck) -> usize {
    let mut seen = HashSet::new();
    let mut flagged = 0;

    for candidate in candidates.iter_mut() {
        let key = candidate.parsed.organization.name.trim().to_lowercase();
        if key.is_empty() || !candidate.validation.is_valid() {
            continue;
        }

        let in_store = existing.existing.contains(&key);
        let earlier_row = !seen.insert(key);
        if in_store || earlier_row {
            debug!(
                "Row {}: '{}' is a duplicate ({})",
                candidate.parsed.row_number,
                candidate.parsed.organization.name,
                if in_store { "exists in store" } else { "earlier row" }
            );
            candidate.duplicate = true;
            flagged += 1;
        }
    }

    flagged
}
