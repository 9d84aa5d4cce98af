//! Slot Ledger Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use validator::Validate;

use crate::auth::CurrentShop;
use crate::core::ServerState;
use crate::db::models::{Device, Slot};
use crate::db::repository::{SlotRepository, shop_record_id};
use crate::devices::DeviceLifecycle;
use crate::utils::error::{AppError, AppResponse, ok};
use crate::utils::result::AppResult;
use shared::models::{SlotBatchRequest, SlotBatchResponse};

/// GET /api/slots - every slot registered to the shop
pub async fn list(
    State(state): State<ServerState>,
    shop: CurrentShop,
) -> AppResult<Json<AppResponse<Vec<Slot>>>> {
    let repo = SlotRepository::new(state.get_db());
    let slots = repo.find_by_shop(&shop_record_id(&shop.id)).await?;
    Ok(ok(slots))
}

/// POST /api/slots/batch - register `{prefix}1 ..= {prefix}{count}`
///
/// Returns the QR payload strings to print. Re-registering the shop's own
/// ids is a no-op; an id already claimed by another shop aborts the batch.
pub async fn batch_register(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Json(req): Json<SlotBatchRequest>,
) -> AppResult<Json<AppResponse<SlotBatchResponse>>> {
    req.validate()?;

    let repo = SlotRepository::new(state.get_db());
    let shop_id = shop_record_id(&shop.id);

    let mut slots = Vec::with_capacity(req.count as usize);
    for n in 1..=req.count {
        let slot_id = format!("{}{}", req.prefix, n);
        let slot = repo.ensure_registered(&slot_id, &shop_id).await?;
        if slot.owner_shop != shop_id {
            return Err(AppError::conflict(format!(
                "Slot id {} is already registered to another shop",
                slot_id
            )));
        }
        slots.push(slot_id);
    }

    tracing::info!(prefix = %req.prefix, count = req.count, "Slot batch registered");
    state
        .sync
        .publish("slot", "registered", &req.prefix, &shop.id, Some(&slots));

    Ok(ok(SlotBatchResponse { slots }))
}

/// Scan result: what the terminal does next depends on `occupied`
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub slot_id: String,
    /// An active (charging | ready) device occupies this slot
    pub occupied: bool,
    /// The occupying device, present iff occupied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
}

/// GET /api/slots/{slot_id}/scan
///
/// Occupied by an active device → the terminal opens the checkout flow;
/// otherwise a new check-in pre-filled with this slot id.
pub async fn scan(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Path(slot_id): Path<String>,
) -> AppResult<Json<AppResponse<ScanResponse>>> {
    let lifecycle = DeviceLifecycle::new(state.get_db(), state.sync.clone());
    let device = lifecycle.lookup_active_device(&shop, &slot_id).await?;

    Ok(ok(ScanResponse {
        slot_id,
        occupied: device.is_some(),
        device,
    }))
}

/// POST /api/slots/{slot_id}/release - manual unbind
///
/// Operator action for reconciling a stuck binding (e.g. a device record
/// erased while its slot stayed occupied). Idempotent.
pub async fn release(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Path(slot_id): Path<String>,
) -> AppResult<Json<AppResponse<Slot>>> {
    let repo = SlotRepository::new(state.get_db());
    let slot = repo
        .release(&slot_id, &shop_record_id(&shop.id))
        .await?
        .ok_or_else(|| AppError::not_found(format!("Slot {}", slot_id)))?;

    tracing::info!(slot_id = %slot_id, "Slot manually released");
    state
        .sync
        .publish("slot", "released", &slot_id, &shop.id, Some(&slot));

    Ok(ok(slot))
}
