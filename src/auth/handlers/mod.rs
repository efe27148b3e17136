//! HTTP handlers for authentication

pub mod login;
pub mod me;
pub mod register;
pub mod types;

pub use login::login;
pub use me::me;
pub use register::register;
