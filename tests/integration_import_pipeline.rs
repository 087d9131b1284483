//! Integration tests for the import pipeline against a JSON file store
//!
//! These tests read real CSV files from disk, import them into a store file
//! and reopen the store to check what was persisted.

use crm_importer::ImportConfig;
use crm_importer::app::adapters::json_store::JsonFileStore;
use crm_importer::app::adapters::store::{Filter, RecordStore};
use crm_importer::app::models::{EntityKind, ImportState, SkipReason, TargetField};
use crm_importer::app::services::csv_reader::CsvReader;
use crm_importer::app::services::import_executor::NoProgress;
use crm_importer::app::services::import_pipeline::{ImportOutcome, ImportPipeline};
use crm_importer::constants::{CONTACTS_TABLE, ORGANIZATIONS_TABLE};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const TRADE_SHOW_CSV: &str = "\u{feff}Company Name,Primary Contact,Email Address,Telephone,City,Tier\n\
    Harbor Seafood Grill,Maria Lopez,maria@harbor.example,555-0110,Portland,A\n\
    Green Valley Market,Tom Reed,tom@greenvalley.example,555-0111,Salem,b\n\
    Summit Hotel,,,555-0112,Bend,\n\
    ,Orphan Person,orphan@example.com,,,\n";

async fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    tokio::fs::write(&path, content).await.unwrap();
    path
}

async fn import(csv_path: &Path, store_path: &Path) -> ImportOutcome {
    let document = CsvReader::new().read_file(csv_path).await.unwrap();
    let store = Arc::new(JsonFileStore::open(store_path).await.unwrap());

    ImportPipeline::new(ImportConfig::default())
        .unwrap()
        .run(&document, "trade-show.csv", store, &NoProgress)
        .await
        .unwrap()
}

/// Import a file end to end and check the persisted store
#[tokio::test]
async fn test_import_persists_to_store_file() {
    let dir = TempDir::new().unwrap();
    let csv_path = write_csv(&dir, "trade-show.csv", TRADE_SHOW_CSV).await;
    let store_path = dir.path().join("crm.json");

    let outcome = import(&csv_path, &store_path).await;

    let result = &outcome.result;
    assert_eq!(result.state, ImportState::Completed);
    assert!(result.is_balanced());
    assert_eq!(result.organizations.created, 3);
    assert_eq!(
        result.skipped_for(EntityKind::Organization, SkipReason::Invalid),
        1
    );
    assert_eq!(result.contacts.created, 2);
    assert_eq!(
        result.skipped_for(EntityKind::Contact, SkipReason::ParentNotImported),
        1
    );
    assert_eq!(
        outcome.summary,
        "Created 3 organizations and 2 contacts; 1 organization skipped (invalid); \
         1 contact skipped (organization not imported)"
    );
    assert_eq!(outcome.row_errors.len(), 1);
    assert!(outcome.row_errors[0].message.contains("Row 4"));

    let reopened = JsonFileStore::open(&store_path).await.unwrap();
    assert_eq!(reopened.count(ORGANIZATIONS_TABLE).await, 3);
    assert_eq!(reopened.count(CONTACTS_TABLE).await, 2);

    let organizations = reopened
        .select(ORGANIZATIONS_TABLE, &Filter::All)
        .await
        .unwrap();
    let harbor = organizations
        .iter()
        .find(|r| r["name"] == "Harbor Seafood Grill")
        .unwrap();
    assert_eq!(harbor["city"], "Portland");
    assert_eq!(harbor["priority"], "A");
    assert_eq!(harbor["segment"], "Restaurant");

    let contacts = reopened.select(CONTACTS_TABLE, &Filter::All).await.unwrap();
    let maria = contacts
        .iter()
        .find(|r| r["first_name"] == "Maria")
        .unwrap();
    assert_eq!(maria["last_name"], "Lopez");
    assert_eq!(maria["email"], "maria@harbor.example");
    assert!(maria["organization_id"].is_u64());
}

/// Importing the same file twice creates nothing the second time
#[tokio::test]
async fn test_second_import_skips_existing_organizations() {
    let dir = TempDir::new().unwrap();
    let csv_path = write_csv(&dir, "trade-show.csv", TRADE_SHOW_CSV).await;
    let store_path = dir.path().join("crm.json");

    import(&csv_path, &store_path).await;
    let second = import(&csv_path, &store_path).await;

    assert_eq!(second.result.organizations.created, 0);
    assert_eq!(second.result.contacts.created, 0);
    assert_eq!(
        second
            .result
            .skipped_for(EntityKind::Organization, SkipReason::Duplicate),
        3
    );
    assert!(second.result.is_balanced());
    assert!(second.summary.contains("3 organizations skipped (duplicates)"));

    let reopened = JsonFileStore::open(&store_path).await.unwrap();
    assert_eq!(reopened.count(ORGANIZATIONS_TABLE).await, 3);
    assert_eq!(reopened.count(CONTACTS_TABLE).await, 2);
}

/// Preview reports mappings and row issues and writes nothing
#[tokio::test]
async fn test_preview_reads_file_without_store() {
    let dir = TempDir::new().unwrap();
    let csv_path = write_csv(&dir, "trade-show.csv", TRADE_SHOW_CSV).await;

    let document = CsvReader::new().read_file(&csv_path).await.unwrap();
    assert_eq!(document.headers[0], "Company Name");
    assert_eq!(document.row_count(), 4);

    let preview = ImportPipeline::new(ImportConfig::default())
        .unwrap()
        .preview(&document, "trade-show.csv")
        .unwrap();

    assert!(preview.can_import());
    assert_eq!(preview.valid_rows(), 3);
    assert_eq!(preview.invalid_rows(), 1);
    assert_eq!(preview.contact_count(), 3);

    let organization = preview
        .mappings
        .iter()
        .find(|m| m.csv_column == "Company Name")
        .unwrap();
    assert_eq!(organization.field(), Some(TargetField::OrganizationName));

    let errors: Vec<_> = preview
        .row_issues()
        .filter(|(_, is_error)| *is_error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].0.message.contains("Row 4"));
}

/// A CSV without any organization column is refused before writing
#[tokio::test]
async fn test_unmappable_file_is_refused() {
    let dir = TempDir::new().unwrap();
    let csv_path = write_csv(&dir, "emails.csv", "Email\nsomeone@example.com\n").await;
    let store_path = dir.path().join("crm.json");

    let document = CsvReader::new().read_file(&csv_path).await.unwrap();
    let store = Arc::new(JsonFileStore::open(&store_path).await.unwrap());

    let result = ImportPipeline::new(ImportConfig::default())
        .unwrap()
        .run(&document, "emails.csv", store, &NoProgress)
        .await;

    assert!(matches!(
        result,
        Err(crm_importer::Error::BatchRejected { .. })
    ));
    assert!(!store_path.exists());
}
