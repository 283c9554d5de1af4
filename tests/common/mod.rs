//! Shared spreadsheet fixtures for integration tests

#![allow(dead_code)]

use dues_receipts::types::COLUMN_NAMES;
use rust_xlsxwriter::Workbook;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

/// One data row: house, landlord, then the twelve money columns
pub fn dues_row(house: &'static str, landlord: &'static str, amounts: [f64; 12]) -> Vec<Cell> {
    let mut row = vec![Cell::Text(house), Cell::Text(landlord)];
    row.extend(amounts.iter().map(|a| Cell::Number(*a)));
    row
}

/// `House="12"` row used for the end-to-end scenario
pub fn bello_row() -> Vec<Cell> {
    dues_row(
        "12",
        "A. Bello",
        [
            150000.0, 20000.0, 0.0, 30000.0, 0.0, 10000.0, 10000.0, 10000.0, 10000.0, 0.0,
            90000.0, 60000.0,
        ],
    )
}

/// Header row, two decoration rows, then `data`
pub fn dues_sheet(data: Vec<Vec<Cell>>) -> Vec<Vec<Cell>> {
    let mut rows = vec![
        COLUMN_NAMES.iter().map(|name| Cell::Text(*name)).collect(),
        vec![Cell::Text("INTEGRITY COURT RESIDENTS ASSOCIATION")],
        vec![Cell::Text("Dues as at May 2025")],
    ];
    rows.extend(data);
    rows
}

pub fn write_workbook(path: &Path, sheet: &str, rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).unwrap();

    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(r as u32, c as u16, *text).unwrap();
                }
                Cell::Number(n) => {
                    worksheet.write_number(r as u32, c as u16, *n).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Workbook with a `FULL VIEW` dues sheet holding `data`
pub fn write_dues_workbook(path: &Path, data: Vec<Vec<Cell>>) {
    write_workbook(path, "FULL VIEW", &dues_sheet(data));
}
