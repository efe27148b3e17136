//! Business profile shown on the account page

pub mod db;
pub mod handlers;
pub mod types;
