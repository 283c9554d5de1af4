//! Dues Receipts - landlord dues spreadsheet → per-household receipts
//!
//! This library reads the `FULL VIEW` sheet of a dues workbook, renders one
//! single-page receipt per household and bundles them into a zip archive.
//!
//! # Features
//!
//! - Positional 14-column dues schema with blank cells read as zero
//! - Declarative receipt layout (centred, right-aligned, currency columns)
//! - PDF output with logo letterhead, or plain text
//! - Isolated output folder per batch
//! - Upload form and download server
//!
//! # Example
//!
//! ```no_run
//! use dues_receipts::batch::BatchRunner;
//! use dues_receipts::config::BatchConfig;
//! use std::path::Path;
//!
//! let runner = BatchRunner::new(BatchConfig::default());
//! let summary = runner.run(Path::new("dues.xlsx"))?;
//!
//! println!("Receipts: {}", summary.receipt_count());
//! println!("Archive: {}", summary.archive.display());
//! # Ok::<(), dues_receipts::error::ReceiptError>(())
//! ```

pub mod api;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod receipt;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{ReceiptError, ReceiptResult};
pub use types::DuesRecord;
