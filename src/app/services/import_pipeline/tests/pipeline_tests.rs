//! Tests for full import runs

use super::*;
use crate::ImportConfig;
use crate::app::adapters::memory_store::InMemoryStore;
use crate::app::models::{EntityKind, ImportState, MappingTarget, SkipReason, TargetField};
use crate::app::services::import_executor::NoProgress;
use crate::app::services::import_pipeline::ImportPipeline;
use crate::constants::{CONTACTS_TABLE, ORGANIZATIONS_TABLE};
use serde_json::json;
use std::sync::Arc;

const CUSTOMERS_CSV: &str = "Company,Contact,Email,Phone,Priority\n\
    Tony's Pizzeria,\"Smith, John\",john@tonys.example,555-0100,a\n\
    Unique Widgets Inc,Jane Doe,bad-email,555-0101,\n\
    ,Nobody Here,,,\n\
    Acme Corp,Wile Coyote,wile@acme.example,,B\n";

fn pipeline(config: ImportConfig) -> ImportPipeline {
    ImportPipeline::new(config).unwrap()
}

async fn seeded_store(names: &[&str]) -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    for name in names {
        let record = json!({ "name": name }).as_object().cloned().unwrap();
        store.seed(ORGANIZATIONS_TABLE, record).await;
    }
    store
}

#[tokio::test]
async fn test_full_import() {
    let store = seeded_store(&[]).await;
    let outcome = pipeline(ImportConfig::default())
        .run(&document(CUSTOMERS_CSV), "customers.csv", store.clone(), &NoProgress)
        .await
        .unwrap();

    let result = &outcome.result;
    assert_eq!(result.state, ImportState::Completed);
    assert_eq!(result.organizations.submitted, 4);
    assert_eq!(result.organizations.created, 3);
    assert_eq!(result.organizations.skipped, 1);
    assert_eq!(result.contacts.submitted, 4);
    assert_eq!(result.contacts.created, 3);
    assert_eq!(result.contacts.skipped, 1);
    assert!(result.is_balanced());
    assert!(!result.duplicate_check_unavailable);

    assert_eq!(outcome.row_errors.len(), 1);
    assert!(outcome.row_errors[0].message.starts_with("Row 3:"));
    assert_eq!(outcome.row_warnings.len(), 1);
    assert!(outcome.row_warnings[0].message.contains("bad-email"));

    assert_eq!(
        outcome.summary,
        "Created 3 organizations and 3 contacts; 1 organization skipped (invalid); \
         1 contact skipped (organization not imported)"
    );

    assert_eq!(store.count(ORGANIZATIONS_TABLE).await, 3);
    assert_eq!(store.count(CONTACTS_TABLE).await, 3);
}

#[tokio::test]
async fn test_existing_organizations_are_skipped() {
    let store = seeded_store(&["ACME CORP"]).await;
    let outcome = pipeline(ImportConfig::default())
        .run(&document(CUSTOMERS_CSV), "customers.csv", store.clone(), &NoProgress)
        .await
        .unwrap();

    let result = &outcome.result;
    assert_eq!(result.organizations.created, 2);
    assert_eq!(
        result.skipped_for(EntityKind::Organization, SkipReason::Duplicate),
        1
    );
    assert_eq!(
        result.skipped_for(EntityKind::Contact, SkipReason::ParentNotImported),
        2
    );
    assert!(result.is_balanced());
    assert!(outcome.summary.contains("1 organization skipped (duplicates)"));

    // seeded record plus two new ones
    assert_eq!(store.count(ORGANIZATIONS_TABLE).await, 3);
}

#[tokio::test]
async fn test_duplicates_allowed() {
    let store = seeded_store(&["Acme Corp"]).await;
    let outcome = pipeline(ImportConfig::default().with_duplicates_allowed())
        .run(&document(CUSTOMERS_CSV), "customers.csv", store.clone(), &NoProgress)
        .await
        .unwrap();

    assert_eq!(outcome.result.organizations.created, 3);
    assert_eq!(store.count(ORGANIZATIONS_TABLE).await, 4);
}

#[tokio::test]
async fn test_within_file_duplicates_keep_first_row() {
    let store = seeded_store(&[]).await;
    let csv = "Company,City\nGlobex,Springfield\nglobex ,Shelbyville\nInitech,Austin\n";

    let outcome = pipeline(ImportConfig::default())
        .run(&document(csv), "inline", store.clone(), &NoProgress)
        .await
        .unwrap();

    assert_eq!(outcome.result.organizations.created, 2);
    let skip = &outcome.result.skipped_rows[0];
    assert_eq!(skip.row_number, 2);
    assert_eq!(skip.reason, SkipReason::Duplicate);

    let stored = store
        .select(ORGANIZATIONS_TABLE, &Filter::All)
        .await
        .unwrap();
    assert_eq!(stored[0]["city"], "Springfield");
}

#[tokio::test]
async fn test_duplicate_target_override_refuses_import() {
    let store = seeded_store(&[]).await;
    let csv = "Company Name,Account Ref\nAcme,ACME-1\n";

    let result = pipeline(ImportConfig::default())
        .with_override(
            "Account Ref",
            MappingTarget::Field(TargetField::OrganizationName),
        )
        .run(&document(csv), "inline", store.clone(), &NoProgress)
        .await;

    match result {
        Err(Error::BatchRejected { issues }) => {
            assert_eq!(issues.len(), 1);
            assert!(issues[0].contains("organization_name"));
        }
        other => panic!("expected batch rejection, got {:?}", other.map(|o| o.summary)),
    }
    assert_eq!(store.count(ORGANIZATIONS_TABLE).await, 0);
}

#[tokio::test]
async fn test_missing_organization_column_refuses_import() {
    let store = seeded_store(&[]).await;
    let result = pipeline(ImportConfig::default())
        .run(
            &document("Email\na@b.co\n"),
            "inline",
            store.clone(),
            &NoProgress,
        )
        .await;

    assert!(matches!(result, Err(Error::BatchRejected { .. })));
    assert_eq!(store.count(ORGANIZATIONS_TABLE).await, 0);
}

#[tokio::test]
async fn test_unavailable_duplicate_check_fails_open() {
    let store = Arc::new(SelectFailingStore::default());
    let outcome = pipeline(ImportConfig::default())
        .run(&document(CUSTOMERS_CSV), "customers.csv", store.clone(), &NoProgress)
        .await
        .unwrap();

    assert_eq!(outcome.result.state, ImportState::Completed);
    assert_eq!(outcome.result.organizations.created, 3);
    assert!(outcome.result.duplicate_check_unavailable);
    assert!(outcome.summary.ends_with("; duplicate check unavailable"));
    assert_eq!(store.inner.count(ORGANIZATIONS_TABLE).await, 3);
}

#[tokio::test]
async fn test_segment_and_priority_are_stored() {
    let store = seeded_store(&[]).await;
    pipeline(ImportConfig::default())
        .run(&document(CUSTOMERS_CSV), "customers.csv", store.clone(), &NoProgress)
        .await
        .unwrap();

    let stored = store
        .select(ORGANIZATIONS_TABLE, &Filter::All)
        .await
        .unwrap();
    let by_name = |name: &str| {
        stored
            .iter()
            .find(|r| r["name"] == name)
            .cloned()
            .unwrap()
    };

    let pizzeria = by_name("Tony's Pizzeria");
    assert_eq!(pizzeria["segment"], "Restaurant");
    assert_eq!(pizzeria["priority"], "A");

    let widgets = by_name("Unique Widgets Inc");
    assert_eq!(widgets["segment"], "General");
    assert_eq!(widgets["priority"], "C");
}
