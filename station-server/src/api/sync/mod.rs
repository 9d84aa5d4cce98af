//! Sync Feed Routes
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/sync/stream | GET | SSE change feed, filtered to the shop |
//! | /api/sync/status | GET | per-resource version snapshot |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sync", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/stream", get(handler::stream))
        .route("/status", get(handler::status))
}
