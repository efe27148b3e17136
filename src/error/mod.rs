//! Error handling for the HTTP layer

pub mod types;

pub use types::ApiError;
