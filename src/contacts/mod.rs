//! Contact management

pub mod db;
pub mod handlers;
pub mod types;
