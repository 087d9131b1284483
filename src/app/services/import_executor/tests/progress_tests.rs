//! Tests for the terminal progress reporter

use super::*;
use crate::app::models::EntityKind;
use crate::app::services::import_executor::{ImportBatch, ImportExecutor, ProgressReporter};
use std::sync::Arc;

#[test]
fn test_disabled_reporter_ignores_events() {
    let reporter = ProgressReporter::new(false);
    assert!(!reporter.is_enabled());

    reporter.on_start(10);
    reporter.on_phase(EntityKind::Organization);
    reporter.on_progress(4, 10);
    reporter.on_finish(&ImportResult::new());

    assert_eq!(reporter.current_position(), 0);
}

#[test]
fn test_enabled_reporter_tracks_position() {
    let reporter = ProgressReporter::new(true);
    assert!(reporter.is_enabled());

    reporter.on_start(5);
    assert_eq!(reporter.current_position(), 0);

    reporter.on_phase(EntityKind::Contact);
    reporter.on_progress(3, 5);
    assert_eq!(reporter.current_position(), 3);
}

#[tokio::test]
async fn test_reporter_ends_at_batch_total() {
    let store = Arc::new(InMemoryStore::new());
    let mut executor = ImportExecutor::new(store);
    let batch = ImportBatch::new(vec![
        candidate(1, "Acme", &["Jane Doe"]),
        candidate(2, "", &["Nobody Here"]),
        candidate(3, "Globex", &[]),
    ]);

    let reporter = ProgressReporter::new(true);
    executor.execute(&batch, &reporter).await.unwrap();

    assert_eq!(batch.total_records(), 5);
    assert_eq!(reporter.current_position(), 5);
}
