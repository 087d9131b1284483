//! Preview command: mappings and validation without writes

use super::shared::{load_configuration, print_issues, print_mappings, read_document, setup_logging};
use crate::app::services::import_pipeline::{ImportPipeline, ImportPreview};
use crate::cli::args::{OutputFormat, PreviewArgs};
use crate::constants::PREVIEW_ISSUE_LIMIT;
use anyhow::{Context, Result};
use colored::*;
use tracing::{debug, info};

/// Run the preview command
pub async fn run_preview(args: PreviewArgs) -> Result<()> {
    setup_logging(&args.common)?;
    debug!("Command line arguments: {:?}", args);

    args.common.validate()?;
    let config = load_configuration(&args.common)?;
    let threshold = config.mapping.low_confidence_threshold;

    let pipeline = ImportPipeline::new(config)
        .context("Invalid import configuration")?
        .with_overrides(args.common.overrides());

    let document = read_document(&args.common).await?;
    let source = args.common.file.display().to_string();
    let preview = pipeline.preview(&document, &source)?;
    info!(
        "Preview ready: {} valid rows, {} invalid",
        preview.valid_rows(),
        preview.invalid_rows()
    );

    match args.common.output_format {
        OutputFormat::Human => print_preview_report(&preview, threshold),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&preview).context("Failed to serialize preview")?
        ),
    }

    Ok(())
}

/// Generate human-readable preview report
fn print_preview_report(preview: &ImportPreview, low_confidence_threshold: u8) {
    println!("\n{} {}", "Import preview for".bold(), preview.source);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    print_mappings(&preview.mappings, low_confidence_threshold);

    let batch_issues: Vec<_> = preview
        .batch_validation
        .errors
        .iter()
        .map(|issue| (issue, true))
        .chain(preview.batch_validation.warnings.iter().map(|issue| (issue, false)))
        .collect();
    print_issues("Mapping issues:", &batch_issues, PREVIEW_ISSUE_LIMIT);

    if !preview.can_import() {
        println!(
            "\n{} fix the mapping issues above (e.g. with --map \"Column=field\")",
            "Import would be refused:".red().bold()
        );
        return;
    }

    let row_issues: Vec<_> = preview.row_issues().collect();
    print_issues("Row issues:", &row_issues, PREVIEW_ISSUE_LIMIT);

    println!("\n{}", "Summary:".bold());
    println!("   • Rows read: {}", preview.candidates.len());
    println!("   • Organizations to import: {}", preview.valid_rows());
    println!("   • Contacts found: {}", preview.contact_count());
    if preview.invalid_rows() > 0 {
        println!(
            "   • {}",
            format!("Rows that will be skipped: {}", preview.invalid_rows()).yellow()
        );
    }
    println!();
}
