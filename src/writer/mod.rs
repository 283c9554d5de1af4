//! Receipt document writers
//!
//! A `DocumentWriter` turns one `ReceiptDocument` into file bytes. The PDF
//! writer is the production format; the text writer lays out the same page
//! on a character grid and needs no font or logo assets.

mod pdf;
mod text;

pub use pdf::{FontMetrics, PdfWriter};
pub use text::TextWriter;

use crate::config::AssetPaths;
use crate::error::ReceiptResult;
use crate::receipt::ReceiptDocument;
use std::fmt;

/// Serializes receipts into one output file format
pub trait DocumentWriter: Send + Sync {
    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn write(&self, document: &ReceiptDocument) -> ReceiptResult<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pdf => f.write_str("pdf"),
            OutputFormat::Text => f.write_str("text"),
        }
    }
}

/// Build the writer for `format`, loading any assets it needs up front
pub fn writer_for(format: OutputFormat, assets: &AssetPaths) -> ReceiptResult<Box<dyn DocumentWriter>> {
    Ok(match format {
        OutputFormat::Pdf => Box::new(PdfWriter::from_assets(assets)?),
        OutputFormat::Text => Box::new(TextWriter::default()),
    })
}
