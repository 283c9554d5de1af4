//! Runtime configuration
//!
//! Every setting is a clap argument with an environment fallback, so the
//! same structs back the CLI flags, the server binary and plain env vars.
//! Relative paths resolve against the working directory.

use crate::types::DEFAULT_SHEET;
use crate::writer::OutputFormat;
use clap::Args;
use std::path::PathBuf;

/// Font and image files the PDF letterhead needs
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    /// Regular TrueType font
    #[arg(long = "font", default_value = "DejaVuSans.ttf", env = "RECEIPTS_FONT")]
    pub font_regular: PathBuf,

    /// Bold TrueType font
    #[arg(long, default_value = "DejaVuSans-Bold.ttf", env = "RECEIPTS_FONT_BOLD")]
    pub font_bold: PathBuf,

    /// Letterhead logo (JPEG or PNG)
    #[arg(long, default_value = "logo.jpeg", env = "RECEIPTS_LOGO")]
    pub logo: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            font_regular: PathBuf::from("DejaVuSans.ttf"),
            font_bold: PathBuf::from("DejaVuSans-Bold.ttf"),
            logo: PathBuf::from("logo.jpeg"),
        }
    }
}

/// Where batches read from and write to, and how receipts are rendered
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Directory uploaded spreadsheets are staged in
    #[arg(long, default_value = "uploads", env = "RECEIPTS_UPLOAD_DIR")]
    pub upload_dir: PathBuf,

    /// Directory batch output folders are created in
    #[arg(long, default_value = "receipts", env = "RECEIPTS_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Worksheet holding the dues table
    #[arg(long = "sheet", default_value = DEFAULT_SHEET, env = "RECEIPTS_SHEET")]
    pub sheet_name: String,

    /// Receipt file format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pdf, env = "RECEIPTS_FORMAT")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub assets: AssetPaths,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("receipts"),
            sheet_name: DEFAULT_SHEET.to_string(),
            format: OutputFormat::Pdf,
            assets: AssetPaths::default(),
        }
    }
}
