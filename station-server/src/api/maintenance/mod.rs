//! Maintenance Routes
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/maintenance/erase | POST | bulk-erase all shop data |

mod handler;


use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/maintenance/erase", post(handler::erase))
}
