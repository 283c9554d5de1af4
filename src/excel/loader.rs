//! Dues sheet loader - spreadsheet → `DuesRecord`s

use crate::error::{ReceiptError, ReceiptResult};
use crate::types::{DuesRecord, COLUMN_COUNT, COLUMN_NAMES};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Rows consumed as the column header
const HEADER_ROWS: u32 = 1;

/// Title/decoration rows below the header that never hold data
const DECORATION_ROWS: u32 = 2;

/// First sheet row (0-based) that may hold a household
const FIRST_DATA_ROW: u32 = HEADER_ROWS + DECORATION_ROWS;

/// Loader for the landlord dues workbook
pub struct DuesLoader {
    path: PathBuf,
}

impl DuesLoader {
    /// Create a loader for the workbook at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read `sheet_name` and return one record per row with a house identifier
    pub fn load(&self, sheet_name: &str) -> ReceiptResult<Vec<DuesRecord>> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| {
            ReceiptError::Format(format!(
                "Failed to open '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
            return Err(ReceiptError::SheetNotFound(sheet_name.to_string()));
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| ReceiptError::Format(format!("Failed to read '{}': {}", sheet_name, e)))?;

        self.records_from_range(&range)
    }

    /// Reshape a worksheet range into records
    fn records_from_range(&self, range: &Range<Data>) -> ReceiptResult<Vec<DuesRecord>> {
        let (Some((start_row, _)), Some((end_row, end_col))) = (range.start(), range.end()) else {
            return Err(ReceiptError::SchemaMismatch(format!(
                "sheet is empty, expected {} columns",
                COLUMN_COUNT
            )));
        };

        let width = end_col as usize + 1;
        if width < COLUMN_COUNT {
            return Err(ReceiptError::SchemaMismatch(format!(
                "expected {} columns, found {}",
                COLUMN_COUNT, width
            )));
        }

        let mut records = Vec::new();
        for row in start_row.max(FIRST_DATA_ROW)..=end_row {
            let cell = |col: usize| range.get_value((row, col as u32));

            let Some(house) = cell(0).and_then(cell_text).map(|h| h.trim().to_string()) else {
                continue;
            };
            if house.is_empty() {
                debug!(row = row + 1, "skipping row without house");
                continue;
            }

            let landlord = cell(1).and_then(cell_text).unwrap_or_else(|| "0".to_string());
            let mut record = DuesRecord::new(house, landlord);

            for col in 2..COLUMN_COUNT {
                let amount = match cell(col) {
                    Some(data) => parse_amount(data).ok_or_else(|| {
                        ReceiptError::Format(format!(
                            "row {}, column '{}': '{}' is not a whole number",
                            row + 1,
                            COLUMN_NAMES[col],
                            data
                        ))
                    })?,
                    None => 0,
                };
                if let Some(field) = record.amount_mut(col) {
                    *field = amount;
                }
            }

            records.push(record);
        }

        if records.is_empty() {
            warn!(path = %self.path.display(), "no households found");
        }
        Ok(records)
    }
}

/// Text of a non-empty cell; `None` for blank and error cells
fn cell_text(data: &Data) -> Option<String> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_float(*f)),
        other => Some(other.to_string()),
    }
}

/// Render integral floats without a fractional part (12.0 → "12")
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// Whole-unit amount of a money cell. Blank cells count as zero; fractions
/// are truncated toward zero.
fn parse_amount(data: &Data) -> Option<i64> {
    match data {
        Data::Empty | Data::Error(_) => Some(0),
        Data::Int(i) => Some(*i),
        Data::Float(f) => Some(f.trunc() as i64),
        Data::Bool(b) => Some(i64::from(*b)),
        Data::String(s) if s.trim().is_empty() => Some(0),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
