//! Server configuration, state and initialization

pub mod config;
pub mod init;
pub mod state;
