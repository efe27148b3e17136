//! Per-user application settings

pub mod db;
pub mod handlers;
pub mod types;
