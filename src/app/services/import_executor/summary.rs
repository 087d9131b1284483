//! Human-readable import summaries

use crate::app::models::{EntityKind, ImportResult, SkipReason};

const SKIP_REASONS: [SkipReason; 3] = [
    SkipReason::Duplicate,
    SkipReason::Invalid,
    SkipReason::ParentNotImported,
];

/// One-line summary of an import
///
/// Always states what was created; skip reasons, failures and an
/// unavailable duplicate check are appended only when they occurred, e.g.
/// `Created 12 organizations and 8 contacts; 2 organizations skipped (duplicates)`.
pub fn format_summary(result: &ImportResult) -> String {
    let mut parts = vec![format!(
        "Created {} {} and {} {}",
        result.organizations.created,
        EntityKind::Organization.noun(result.organizations.created),
        result.contacts.created,
        EntityKind::Contact.noun(result.contacts.created),
    )];

    for entity in [EntityKind::Organization, EntityKind::Contact] {
        for reason in SKIP_REASONS {
            let count = result.skipped_for(entity, reason);
            if count > 0 {
                parts.push(format!(
                    "{} {} skipped ({})",
                    count,
                    entity.noun(count),
                    reason.label()
                ));
            }
        }
    }

    for entity in [EntityKind::Organization, EntityKind::Contact] {
        let count = result.entity(entity).failed.len();
        if count > 0 {
            parts.push(format!("{} {} failed", count, entity.noun(count)));
        }
    }

    if result.duplicate_check_unavailable {
        parts.push("duplicate check unavailable".to_string());
    }

    parts.join("; ")
}
