use clap::{Parser, Subcommand};
use dues_receipts::api::{init_tracing, run_api_server, ApiConfig};
use dues_receipts::cli;
use dues_receipts::config::BatchConfig;
use dues_receipts::types::DEFAULT_SHEET;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "receipts")]
#[command(about = "Landlord dues spreadsheet → one receipt per household, zipped.")]
#[command(long_about = "Receipts - landlord dues receipt generator

Reads the 'FULL VIEW' sheet of a dues workbook, renders one single-page
receipt per household and bundles them into all_receipts.zip.

COMMANDS:
  generate  - Render receipts for a spreadsheet into a new batch folder
  check     - Load a spreadsheet and list the households it contains
  serve     - Run the upload/download web server

EXAMPLES:
  receipts check dues.xlsx
  receipts generate dues.xlsx --output-dir receipts
  receipts generate dues.xlsx --format text
  PORT=8000 receipts serve")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Render receipts for every household in a spreadsheet.

Each run creates <output-dir>/<batch-id>/ containing Receipt_<house>.pdf
files and all_receipts.zip. A failed run leaves no batch folder behind.

PDF output needs the regular and bold TrueType fonts and the logo image
(see --font, --font-bold, --logo). Text output needs no assets.")]
    /// Render receipts for a spreadsheet
    Generate {
        /// Path to the dues workbook (.xlsx, .xls, .ods)
        input: PathBuf,

        #[command(flatten)]
        batch: BatchConfig,

        /// List every receipt written
        #[arg(short, long)]
        verbose: bool,
    },

    /// Load a spreadsheet and list its households
    Check {
        /// Path to the dues workbook
        input: PathBuf,

        /// Worksheet holding the dues table
        #[arg(long, default_value = DEFAULT_SHEET, env = "RECEIPTS_SHEET")]
        sheet: String,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the upload/download web server
    Serve {
        /// Host address to bind to
        #[arg(short = 'H', long, default_value = "0.0.0.0", env = "HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "5000", env = "PORT")]
        port: u16,

        #[command(flatten)]
        batch: BatchConfig,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Generate {
            input,
            batch,
            verbose,
        } => cli::generate(input, batch, verbose)?,

        Commands::Check { input, sheet, json } => cli::check(input, sheet, json)?,

        Commands::Serve { host, port, batch } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_api_server(ApiConfig { host, port, batch }))?;
        }
    }

    Ok(())
}
