//! Communities: group bundles with a shared member roster

pub mod db;
pub mod handlers;
pub mod types;
