//! Simulated message delivery
//!
//! There is no real WhatsApp gateway behind this service; delivery is
//! acted out by background tasks that walk each message through the
//! `sent -> delivered -> read` state machine on randomized timers.

pub mod engine;
pub mod policy;
pub mod status;
pub mod store;

pub use engine::SimulationEngine;
pub use policy::{ReadSelection, SimulationPolicy};
pub use status::MessageStatus;
pub use store::{DeliveryStore, SqlDeliveryStore, StoreError};
