//! Bulk-messaging campaigns driven by spreadsheet recipient lists

pub mod db;
pub mod handlers;
pub mod types;
