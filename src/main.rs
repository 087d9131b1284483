use clap::Parser;
use crm_importer::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        // In-flight writes are abandoned on Ctrl-C; records already written stay
        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, stopping import...");
                Err(crm_importer::Error::processing_interrupted(
                    "Import interrupted by user; records written so far were kept",
                )
                .into())
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("CRM Import - organizations and contacts from CSV exports");
    println!("========================================================");
    println!();
    println!("Match CSV columns to CRM fields, validate rows and import");
    println!("organizations and contacts into a JSON record store.");
    println!();
    println!("USAGE:");
    println!("    crm-import <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    preview     Show column mappings and row issues without writing");
    println!("    import      Import the CSV into the record store");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Check how columns will be mapped:");
    println!("    crm-import preview --file customers.csv");
    println!();
    println!("    # Import, fixing one column mapping by hand:");
    println!("    crm-import import --file customers.csv --store crm.json \\");
    println!("                      --map \"Full Name=contact_name\"");
    println!();
    println!("    # Machine-readable result:");
    println!("    crm-import import --file customers.csv --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    crm-import <COMMAND> --help");
}
