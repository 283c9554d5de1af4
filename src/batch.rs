//! Batch orchestration
//!
//! One batch = one uploaded table. Every batch writes into its own
//! `<output_dir>/<batch_id>/` folder: one receipt per household plus
//! `all_receipts.zip`. A failed batch leaves nothing behind, and a staged
//! upload is deleted once its batch has run.

use crate::config::BatchConfig;
use crate::error::{ReceiptError, ReceiptResult};
use crate::excel::DuesLoader;
use crate::receipt::render;
use crate::types::DuesRecord;
use crate::writer::{writer_for, DocumentWriter};
use chrono::{Local, NaiveDateTime};
use regex::Regex;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::SystemTime;
use tracing::{debug, info, warn};
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive produced for every batch
pub const ARCHIVE_NAME: &str = "all_receipts.zip";

/// Identifier of one batch and name of its output folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchId(Uuid);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for BatchId {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ReceiptError::Input(format!("invalid batch id '{}'", s)))
    }
}

/// Result of a completed batch
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub id: BatchId,
    pub directory: PathBuf,
    pub archive: PathBuf,
    /// Receipt files in archive order
    pub receipts: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn receipt_count(&self) -> usize {
        self.receipts.len()
    }
}

/// `Receipt_<house>.<ext>`, with anything unsafe in a file name replaced by `_`
pub fn receipt_file_name(house: &str, extension: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let unsafe_chars = UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]").expect("valid regex"));
    format!("Receipt_{}.{}", unsafe_chars.replace_all(house, "_"), extension)
}

/// Runs load → render → package for uploaded tables
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn batch_dir(&self, id: BatchId) -> PathBuf {
        self.config.output_dir.join(id.to_string())
    }

    pub fn archive_path(&self, id: BatchId) -> PathBuf {
        self.batch_dir(id).join(ARCHIVE_NAME)
    }

    /// Save an uploaded file under the upload directory and return its path
    pub fn stage_upload(&self, file_name: &str, bytes: &[u8]) -> ReceiptResult<PathBuf> {
        let base = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ReceiptError::Input("uploaded file has no name".to_string()))?;

        fs::create_dir_all(&self.config.upload_dir)?;
        let path = self
            .config
            .upload_dir
            .join(format!("{}_{}", Uuid::new_v4().simple(), base));
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "upload staged");
        Ok(path)
    }

    /// Stage an uploaded table, run a batch over it, then delete the staged copy
    pub fn run_upload(&self, file_name: &str, bytes: &[u8]) -> ReceiptResult<BatchSummary> {
        let input = self.stage_upload(file_name, bytes)?;
        let result = self.run(&input);
        if let Err(e) = fs::remove_file(&input) {
            warn!(path = %input.display(), error = %e, "failed to remove staged upload");
        }
        result
    }

    /// Most recently written batch archive under the output directory
    pub fn newest_batch(&self) -> ReceiptResult<Option<BatchId>> {
        let entries = match fs::read_dir(&self.config.output_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut newest: Option<(SystemTime, BatchId)> = None;
        for entry in entries {
            let entry = entry?;
            let Some(id) = entry.file_name().to_str().and_then(|n| n.parse::<BatchId>().ok())
            else {
                continue;
            };
            let Ok(modified) = fs::metadata(self.archive_path(id)).and_then(|m| m.modified())
            else {
                continue;
            };
            if newest.map_or(true, |(time, _)| modified > time) {
                newest = Some((modified, id));
            }
        }
        Ok(newest.map(|(_, id)| id))
    }

    /// Run a batch stamped with the current local time
    pub fn run(&self, input: &Path) -> ReceiptResult<BatchSummary> {
        self.run_at(input, Local::now().naive_local())
    }

    /// Run a batch with every receipt stamped `timestamp`
    pub fn run_at(&self, input: &Path, timestamp: NaiveDateTime) -> ReceiptResult<BatchSummary> {
        let writer = writer_for(self.config.format, &self.config.assets)?;
        let records = DuesLoader::new(input).load(&self.config.sheet_name)?;

        let id = BatchId::new();
        let directory = self.batch_dir(id);
        fs::create_dir_all(&directory)?;
        info!(batch = %id, records = records.len(), input = %input.display(), "batch started");

        let result = write_batch(writer.as_ref(), &records, timestamp, &directory);
        match result {
            Ok(receipts) => {
                let summary = BatchSummary {
                    id,
                    archive: directory.join(ARCHIVE_NAME),
                    directory,
                    receipts,
                };
                info!(batch = %id, receipts = summary.receipt_count(), "batch complete");
                Ok(summary)
            }
            Err(e) => {
                if let Err(cleanup) = fs::remove_dir_all(&directory) {
                    warn!(batch = %id, error = %cleanup, "failed to remove incomplete batch");
                }
                Err(e)
            }
        }
    }
}

fn write_batch(
    writer: &dyn DocumentWriter,
    records: &[DuesRecord],
    timestamp: NaiveDateTime,
    directory: &Path,
) -> ReceiptResult<Vec<PathBuf>> {
    let mut receipts: Vec<PathBuf> = Vec::with_capacity(records.len());

    for record in records {
        let document = render(record, &timestamp);
        let path = directory.join(receipt_file_name(&record.house, writer.extension()));
        fs::write(&path, writer.write(&document)?)?;
        debug!(house = %record.house, path = %path.display(), "receipt written");

        if receipts.contains(&path) {
            warn!(house = %record.house, "duplicate house, earlier receipt overwritten");
        } else {
            receipts.push(path);
        }
    }

    write_archive(&directory.join(ARCHIVE_NAME), &receipts)?;
    Ok(receipts)
}

/// Zip `files` flat (by file name) into `archive`
fn write_archive(archive: &Path, files: &[PathBuf]) -> ReceiptResult<()> {
    let mut zip = ZipWriter::new(File::create(archive)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ReceiptError::Input(format!("bad receipt path {}", path.display())))?;
        zip.start_file(name, options)?;
        zip.write_all(&fs::read(path)?)?;
    }

    zip.finish()?;
    Ok(())
}
