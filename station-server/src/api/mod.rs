//! API Route Modules
//!
//! One module per resource, each exposing a `router()` merged by
//! [`crate::core::Server::build_router`]:
//!
//! - [`health`] - liveness check
//! - [`auth`] - shop account registration and login
//! - [`devices`] - check-in / ready / collect lifecycle
//! - [`slots`] - slot ledger: batch sticker registration, scan, release
//! - [`customers`] - trust directory
//! - [`pos`] - walk-in sales
//! - [`maintenance`] - bulk-erase
//! - [`sync`] - realtime change feed (SSE) and version snapshot

pub mod auth;
pub mod customers;
pub mod devices;
pub mod health;
pub mod maintenance;
pub mod pos;
pub mod slots;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
