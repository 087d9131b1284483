//! Shared components for CLI commands

use crate::app::models::{FieldMapping, MappingTarget, ValidationIssue};
use crate::app::services::csv_reader::{CsvDocument, CsvReader};
use crate::cli::args::CommonArgs;
use crate::config::ImportConfig;
use anyhow::{Context, Result};
use colored::*;
use tracing::{debug, info};

/// Set up structured logging for a command
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v`/`-q`.
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("crm_importer={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration with the layered approach (defaults -> file)
pub fn load_configuration(args: &CommonArgs) -> Result<ImportConfig> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file given, checking default location"),
    }

    ImportConfig::load_layered(args.config_file.as_deref())
        .context("Failed to load configuration")
}

/// Read the CSV input named on the command line
pub async fn read_document(args: &CommonArgs) -> Result<CsvDocument> {
    let document = CsvReader::new()
        .read_file(&args.file)
        .await
        .with_context(|| format!("Failed to read CSV file {}", args.file.display()))?;

    info!(
        "Read {} data rows with {} columns from {}",
        document.row_count(),
        document.headers.len(),
        args.file.display()
    );
    Ok(document)
}

/// Print the column mapping table
pub fn print_mappings(mappings: &[FieldMapping], low_confidence_threshold: u8) {
    println!("{}", "Column mappings:".bold());

    let width = mappings
        .iter()
        .map(|m| m.csv_column.chars().count())
        .max()
        .unwrap_or(0);

    for mapping in mappings {
        let target = format!("{:<20}", mapping.target.to_string());
        let target = match mapping.target {
            MappingTarget::Field(_) => target.normal(),
            MappingTarget::Skip => target.dimmed(),
        };

        let confidence = format!("{:>3}%", mapping.confidence);
        let confidence = if mapping.user_overridden {
            format!("{} (override)", confidence).cyan()
        } else if mapping.is_skip() {
            confidence.dimmed()
        } else if mapping.confidence < low_confidence_threshold {
            confidence.yellow()
        } else {
            confidence.green()
        };

        println!(
            "   • {:<width$}  ->  {} {}",
            mapping.csv_column,
            target,
            confidence,
            width = width
        );
    }
}

/// Print issues as error or warning lines, up to `limit`
pub fn print_issues(title: &str, issues: &[(&ValidationIssue, bool)], limit: usize) {
    if issues.is_empty() {
        return;
    }

    println!("\n{}", title.bold());
    for (issue, is_error) in issues.iter().take(limit) {
        if *is_error {
            println!("   {} {}", "error:".red().bold(), issue);
        } else {
            println!("   {} {}", "warning:".yellow().bold(), issue);
        }
    }

    if issues.len() > limit {
        println!("   ... and {} more", issues.len() - limit);
    }
}
