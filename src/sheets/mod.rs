//! Spreadsheet import: CSV-export fetching and parsing

pub mod client;
pub mod handlers;

pub use client::{contact_fields, parse_sheet_id, SheetData, SheetError, SheetsClient};
