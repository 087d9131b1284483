//! Command implementations for the CRM importer CLI
//!
//! Each command lives in its own module:
//! - `preview`: mapping and validation report without writes
//! - `import`: full import into the JSON record store
//!
//! Commands report failures through `anyhow` with context; `main` prints
//! the chain and sets the exit code.

pub mod import;
pub mod preview;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Dispatch to the selected subcommand
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Preview(preview_args)) => preview::run_preview(preview_args).await,
        Some(Commands::Import(import_args)) => import::run_import(import_args).await,
        None => anyhow::bail!("No command given; run `crm-import --help`"),
    }
}
