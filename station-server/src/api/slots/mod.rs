//! Slot Ledger Routes
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/slots | GET | list the shop's slots |
//! | /api/slots/batch | POST | register a batch of sticker ids |
//! | /api/slots/{slot_id}/scan | GET | scan: active occupant or empty |
//! | /api/slots/{slot_id}/release | POST | manual unbind (operator action) |

mod handler;


use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/slots", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/batch", post(handler::batch_register))
        .route("/{slot_id}/scan", get(handler::scan))
        .route("/{slot_id}/release", post(handler::release))
}
