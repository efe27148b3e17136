//! Ephemeral status updates with a 24-hour lifetime

pub mod db;
pub mod handlers;
pub mod types;
