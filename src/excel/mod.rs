//! Excel import for the landlord dues sheet
//!
//! Reads `.xlsx`, `.xlsm`, `.xls` and `.ods` workbooks and reshapes the
//! dues sheet into typed records.

mod loader;

pub use loader::DuesLoader;
