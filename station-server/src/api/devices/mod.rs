//! Device Lifecycle Routes
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/devices | POST | check-in |
//! | /api/devices | GET | list (optional ?status=) |
//! | /api/devices/{order_no} | GET | fetch one |
//! | /api/devices/{order_no}/ready | POST | charging → ready |
//! | /api/devices/{order_no}/collect | POST | checkout, body carries `proof_token` for slot-bound devices |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/devices", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::check_in).get(handler::list))
        .route("/{order_no}", get(handler::get_by_order_no))
        .route("/{order_no}/ready", post(handler::mark_ready))
        .route("/{order_no}/collect", post(handler::collect))
}
