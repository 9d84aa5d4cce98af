//! Device Lifecycle Handlers
//!
//! Thin HTTP shims over [`DeviceLifecycle`]; every rule (validation, slot
//! proof, conditional transitions) lives in the service.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentShop;
use crate::core::ServerState;
use crate::db::models::Device;
use crate::devices::DeviceLifecycle;
use crate::utils::error::{AppResponse, ok};
use crate::utils::result::AppResult;
use shared::models::{CheckInRequest, CollectRequest, DeviceListQuery};

fn lifecycle(state: &ServerState) -> DeviceLifecycle {
    DeviceLifecycle::new(state.get_db(), state.sync.clone())
}

/// POST /api/devices - check in a device
pub async fn check_in(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Json(req): Json<CheckInRequest>,
) -> AppResult<Json<AppResponse<Device>>> {
    let device = lifecycle(&state).check_in(&shop, req).await?;
    Ok(ok(device))
}

/// GET /api/devices?status= - list the shop's devices, newest first
pub async fn list(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Query(query): Query<DeviceListQuery>,
) -> AppResult<Json<AppResponse<Vec<Device>>>> {
    let devices = lifecycle(&state).list(&shop, query.status).await?;
    Ok(ok(devices))
}

/// GET /api/devices/{order_no}
pub async fn get_by_order_no(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Path(order_no): Path<String>,
) -> AppResult<Json<AppResponse<Device>>> {
    let device = lifecycle(&state).get(&shop, &order_no).await?;
    Ok(ok(device))
}

/// POST /api/devices/{order_no}/ready
pub async fn mark_ready(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Path(order_no): Path<String>,
) -> AppResult<Json<AppResponse<Device>>> {
    let device = lifecycle(&state).mark_ready(&shop, &order_no).await?;
    Ok(ok(device))
}

/// POST /api/devices/{order_no}/collect
///
/// Unslotted devices collect with an empty body `{}`; slot-bound devices
/// must carry `proof_token` with the re-scanned slot id.
pub async fn collect(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Path(order_no): Path<String>,
    Json(req): Json<CollectRequest>,
) -> AppResult<Json<AppResponse<Device>>> {
    let device = lifecycle(&state).collect(&shop, &order_no, req).await?;
    Ok(ok(device))
}
