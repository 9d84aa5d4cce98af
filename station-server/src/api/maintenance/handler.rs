//! Maintenance Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::auth::CurrentShop;
use crate::core::ServerState;
use crate::db::repository::{
    CustomerRepository, DeviceRepository, PosTransactionRepository, SlotRepository,
    shop_record_id,
};
use crate::utils::error::{AppResponse, ok_with_message};
use crate::utils::result::AppResult;

/// What the bulk-erase removed
#[derive(Debug, Serialize)]
pub struct EraseReport {
    pub devices: usize,
    pub customers: usize,
    pub pos_transactions: usize,
    pub slots: usize,
}

/// POST /api/maintenance/erase - wipe all shop data
///
/// Deletes the shop's devices, customers and transactions, deletes its
/// slot rows and resets the order-number counter. Irreversible; the shop
/// account itself survives.
pub async fn erase(
    State(state): State<ServerState>,
    shop: CurrentShop,
) -> AppResult<Json<AppResponse<EraseReport>>> {
    let db = state.get_db();
    let shop_id = shop_record_id(&shop.id);

    let devices = DeviceRepository::new(db.clone());
    let customers = CustomerRepository::new(db.clone());
    let pos = PosTransactionRepository::new(db.clone());
    let slots = SlotRepository::new(db);

    let report = EraseReport {
        devices: devices.erase_by_shop(&shop_id).await?,
        customers: customers.erase_by_shop(&shop_id).await?,
        pos_transactions: pos.erase_by_shop(&shop_id).await?,
        slots: slots.erase_by_shop(&shop_id).await?,
    };
    devices.delete_counter(&shop.id).await?;

    tracing::warn!(
        shop = %shop.id,
        devices = report.devices,
        customers = report.customers,
        pos_transactions = report.pos_transactions,
        slots = report.slots,
        "Bulk-erase executed"
    );
    state
        .sync
        .publish("device", "erased", &shop.id, &shop.id, None::<&()>);

    Ok(ok_with_message(report, "All shop data erased"))
}
