//! Shared types for the ChargeStation system
//!
//! Domain enums, request/response DTOs, and sync event payloads used by
//! both the station server and its clients.

pub mod models;
pub mod sync;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use sync::{SyncEvent, SyncStatus};
