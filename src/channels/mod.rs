//! Broadcast channels: creator-published feeds with followers

pub mod db;
pub mod handlers;
pub mod types;
