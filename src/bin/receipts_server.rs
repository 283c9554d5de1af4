//! Receipts web server binary
//!
//! Serves the upload form, generates receipt batches and hands out archives.

use clap::Parser;
use dues_receipts::api::{init_tracing, run_api_server, ApiConfig};
use dues_receipts::config::BatchConfig;

#[derive(Parser, Debug)]
#[command(name = "receipts-server")]
#[command(version)]
#[command(about = "Receipts web server - upload a dues spreadsheet, download the receipts")]
#[command(long_about = r#"
Receipts web server

Routes:
  - GET  /                    - Upload form
  - POST /                    - Upload a spreadsheet (multipart field "file")
  - GET  /download            - Archive of the most recent batch
  - GET  /download/<batch-id> - Archive of a given batch
  - GET  /health              - Health check

Example usage:
  receipts-server                        # Listen on 0.0.0.0:5000
  PORT=8000 receipts-server --format text
"#)]
struct Args {
    /// Host address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "5000", env = "PORT")]
    port: u16,

    #[command(flatten)]
    batch: BatchConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        batch: args.batch,
    };

    run_api_server(config).await
}
