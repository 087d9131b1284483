//! Command-line argument definitions for the CRM importer
//!
//! This module defines the CLI interface using the clap derive API. Both
//! subcommands share the input, mapping override, configuration and output
//! options; `import` adds the store and execution switches.

use crate::app::models::MappingTarget;
use crate::app::services::field_mapper::parse_override;
use crate::config::ImportConfig;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the CRM CSV importer
///
/// Imports organizations and contacts from arbitrary CSV exports, guessing
/// which column holds which field.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "crm-import",
    version,
    about = "Import organizations and contacts into a CRM from CSV exports",
    long_about = "Reads a CSV export, matches its column headers to CRM fields, splits contact \
                  names, infers organization segment, type and priority, validates every row and \
                  writes organizations and contacts to a JSON record store. Existing organizations \
                  are skipped unless duplicates are allowed."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show column mappings and row issues without writing anything
    Preview(PreviewArgs),
    /// Import the CSV into the record store
    Import(ImportArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// CSV file to read (UTF-8, comma-delimited, first row headers)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "CSV",
        help = "CSV file to import"
    )]
    pub file: PathBuf,

    /// Manual column mapping overrides
    ///
    /// Each override has the form "Column=field" where field is a target
    /// field name such as organization_name or contact_email, or "skip".
    /// May be repeated; later overrides win for the same column.
    #[arg(
        short = 'm',
        long = "map",
        value_name = "COLUMN=FIELD",
        help = "Override a column mapping, e.g. --map \"Full Name=contact_name\""
    )]
    pub map: Vec<MappingOverride>,

    /// Path to configuration file
    ///
    /// TOML configuration file for synonyms, keywords and defaults. If not
    /// specified, looks for <config dir>/crm-import/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and the final summary. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the preview command
#[derive(Debug, Clone, Parser)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// JSON record store file
    ///
    /// Created if it doesn't exist. Defaults to store.path from the
    /// configuration (crm-store.json).
    #[arg(
        short = 's',
        long = "store",
        value_name = "FILE",
        help = "JSON record store to import into"
    )]
    pub store: Option<PathBuf>,

    /// Import organizations even when one with the same name exists
    #[arg(
        long = "allow-duplicates",
        help = "Import organizations that already exist in the store"
    )]
    pub allow_duplicates: bool,

    /// Disable the progress bar
    #[arg(long = "no-progress", help = "Disable the progress bar")]
    pub no_progress: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// One parsed `--map "Column=field"` override
#[derive(Debug, Clone, PartialEq)]
pub struct MappingOverride {
    pub column: String,
    pub target: MappingTarget,
}

impl FromStr for MappingOverride {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (column, target) = parse_override(s)?;
        Ok(Self { column, target })
    }
}

impl CommonArgs {
    /// Validate the shared arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::configuration(format!(
                "CSV file does not exist: {}",
                self.file.display()
            )));
        }

        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "CSV path is not a file: {}",
                self.file.display()
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.is_file() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Get log level based on verbosity and quiet flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Overrides as (column, target) pairs in command-line order
    pub fn overrides(&self) -> Vec<(String, MappingTarget)> {
        self.map
            .iter()
            .map(|o| (o.column.clone(), o.target))
            .collect()
    }
}

impl ImportArgs {
    /// Layer the command-line switches over the loaded configuration
    pub fn apply_to(&self, mut config: ImportConfig) -> ImportConfig {
        if let Some(store) = &self.store {
            config = config.with_store_path(store.clone());
        }
        if self.allow_duplicates {
            config = config.with_duplicates_allowed();
        }
        if self.no_progress || self.common.quiet || self.common.output_format == OutputFormat::Json
        {
            config = config.without_progress();
        }
        config
    }
}
