//! One-to-one chat: threads, messages, auto-reply

pub mod autoreply;
pub mod db;
pub mod handlers;
pub mod types;
