//! POS Transaction Routes
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/pos | POST | ring up a walk-in sale |
//! | /api/pos | GET | list by created_at range (?from=&to=) |

mod handler;


use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pos", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", post(handler::create).get(handler::list))
}
