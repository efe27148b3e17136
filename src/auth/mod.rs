//! Authentication: users, password hashing, JWT tokens

pub mod handlers;
pub mod tokens;
pub mod users;
