//! Sync Feed Handlers

use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    Json,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use tokio::sync::broadcast::error::RecvError;

use crate::auth::CurrentShop;
use crate::core::ServerState;
use crate::sync::RESOURCES;
use crate::utils::error::{AppResponse, ok};
use shared::SyncStatus;

/// GET /api/sync/stream
///
/// Server-sent event feed of the shop's changes. Dropping the connection
/// unsubscribes; a consumer that lags behind the broadcast buffer skips
/// ahead and should call `/api/sync/status` to find out what it missed.
pub async fn stream(
    State(state): State<ServerState>,
    shop: CurrentShop,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.sync.subscribe();
    tracing::debug!(shop = %shop.id, "Sync stream opened");

    let stream = futures::stream::unfold((rx, shop.id), |(mut rx, shop_id)| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    // Tenant filter: only the shop's own changes go out
                    if event.shop != shop_id {
                        continue;
                    }
                    match Event::default().event(event.resource.clone()).json_data(&event) {
                        Ok(sse_event) => {
                            return Some((Ok::<_, Infallible>(sse_event), (rx, shop_id)));
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to encode sync event");
                            continue;
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(shop = %shop_id, skipped, "Sync stream lagged");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// GET /api/sync/status - current version per resource kind
pub async fn status(State(state): State<ServerState>) -> Json<AppResponse<SyncStatus>> {
    let mut versions = HashMap::new();
    for &resource in RESOURCES {
        versions.insert(resource.to_string(), state.sync.versions().get(resource));
    }
    ok(SyncStatus { versions })
}
