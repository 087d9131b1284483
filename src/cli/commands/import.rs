//! Import command: full import into the JSON record store

use super::shared::{load_configuration, print_issues, print_mappings, read_document, setup_logging};
use crate::Error;
use crate::app::adapters::json_store::JsonFileStore;
use crate::app::models::ImportState;
use crate::app::services::import_executor::ProgressReporter;
use crate::app::services::import_pipeline::{ImportOutcome, ImportPipeline};
use crate::cli::args::{ImportArgs, OutputFormat};
use crate::constants::PREVIEW_ISSUE_LIMIT;
use anyhow::{Context, Result};
use colored::*;
use indicatif::HumanDuration;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Run the import command
pub async fn run_import(args: ImportArgs) -> Result<()> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Command line arguments: {:?}", args);

    args.common.validate()?;
    let config = args.apply_to(load_configuration(&args.common)?);
    let threshold = config.mapping.low_confidence_threshold;
    let show_progress = config.import.show_progress;
    let store_path = config.store.path.clone();

    let pipeline = ImportPipeline::new(config)
        .context("Invalid import configuration")?
        .with_overrides(args.common.overrides());

    let document = read_document(&args.common).await?;
    let store = Arc::new(
        JsonFileStore::open(&store_path)
            .await
            .with_context(|| format!("Failed to open record store {}", store_path.display()))?,
    );
    info!("Using record store {}", store.path().display());

    let source = args.common.file.display().to_string();
    let progress = ProgressReporter::new(show_progress);
    let outcome = match pipeline.run(&document, &source, store, &progress).await {
        Ok(outcome) => outcome,
        Err(Error::BatchRejected { issues }) => {
            error!("Import refused with {} mapping issue(s)", issues.len());
            anyhow::bail!(
                "Import refused before any write: {}\nUse --map \"Column=field\" to fix the mappings, or run `crm-import preview` to inspect them",
                issues.join("; ")
            );
        }
        Err(e) => return Err(e).context("Import failed"),
    };

    match args.common.output_format {
        OutputFormat::Human => {
            if !args.common.quiet {
                print_mappings(&outcome.mappings, threshold);
            }
            print_import_report(&outcome, start_time.elapsed());
        }
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialize import result")?
        ),
    }

    if outcome.result.state == ImportState::FailedWithPartialResults {
        anyhow::bail!(
            "{} record(s) could not be written; successful writes were kept",
            outcome.result.failures().count()
        );
    }

    Ok(())
}

/// Generate human-readable import report
fn print_import_report(outcome: &ImportOutcome, elapsed: Duration) {
    let errors: Vec<_> = outcome.row_errors.iter().map(|issue| (issue, true)).collect();
    print_issues("Skipped rows:", &errors, PREVIEW_ISSUE_LIMIT);

    let warnings: Vec<_> = outcome
        .mapping_warnings
        .iter()
        .chain(outcome.row_warnings.iter())
        .map(|issue| (issue, false))
        .collect();
    print_issues("Warnings:", &warnings, PREVIEW_ISSUE_LIMIT);

    let result = &outcome.result;
    if result.has_failures() {
        println!("\n{}", "Failed writes:".red().bold());
        for failure in result.failures() {
            println!(
                "   • row {} {} '{}': {}",
                failure.row_number,
                failure.entity.noun(1),
                failure.name,
                failure.message
            );
        }
    }

    let headline = match result.state {
        ImportState::Completed => "Import complete".green().bold(),
        _ => "Import finished with failures".yellow().bold(),
    };

    println!("\n{}", headline);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   {}", outcome.summary);
    println!("   • Source: {}", outcome.source);
    println!("   • Processing time: {}", HumanDuration(elapsed));
    if result.duplicate_check_unavailable {
        println!(
            "   • {}",
            "Duplicate check was unavailable; existing organizations may have been re-imported"
                .yellow()
        );
    }
    println!();
}
