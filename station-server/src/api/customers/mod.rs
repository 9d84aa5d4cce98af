//! Customer Trust Directory Routes
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/customers | GET | directory listing |
//! | /api/customers/{phone} | GET | lookup for auto-fill / trust badge |
//! | /api/customers/{phone}/risk | PUT | set or clear the risk flag |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{phone}", get(handler::lookup))
        .route("/{phone}/risk", put(handler::set_risk_flag))
}
