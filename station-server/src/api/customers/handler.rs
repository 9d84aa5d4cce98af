//! Customer Trust Directory Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentShop;
use crate::core::ServerState;
use crate::db::models::Customer;
use crate::db::repository::{CustomerRepository, shop_record_id};
use crate::utils::error::{AppError, AppResponse, ok};
use crate::utils::result::AppResult;
use shared::models::RiskFlagRequest;

/// Shortest phone number worth querying; below this the client is still
/// typing
const MIN_PHONE_DIGITS: usize = 10;

/// GET /api/customers - most recent visitors first
pub async fn list(
    State(state): State<ServerState>,
    shop: CurrentShop,
) -> AppResult<Json<AppResponse<Vec<Customer>>>> {
    let repo = CustomerRepository::new(state.get_db());
    let customers = repo.find_by_shop(&shop_record_id(&shop.id)).await?;
    Ok(ok(customers))
}

/// GET /api/customers/{phone}
///
/// Auto-fill / trust-badge lookup during check-in and POS entry. An absent
/// profile is a normal outcome (first-time customer), so the data is
/// `null` rather than a 404. A profile with `is_bad_actor` set tells the
/// calling flow to pre-set its risk toggle.
pub async fn lookup(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Path(phone): Path<String>,
) -> AppResult<Json<AppResponse<Option<Customer>>>> {
    if phone.len() < MIN_PHONE_DIGITS {
        return Err(AppError::validation(format!(
            "Phone must be at least {} digits",
            MIN_PHONE_DIGITS
        )));
    }

    let repo = CustomerRepository::new(state.get_db());
    let customer = repo.find_by_phone(&shop.id, &phone).await?;
    Ok(ok(customer))
}

/// PUT /api/customers/{phone}/risk - explicit operator action
pub async fn set_risk_flag(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Path(phone): Path<String>,
    Json(req): Json<RiskFlagRequest>,
) -> AppResult<Json<AppResponse<Customer>>> {
    let repo = CustomerRepository::new(state.get_db());
    let customer = repo
        .set_risk_flag(&shop.id, &phone, req.flagged, req.reason)
        .await?;

    let action = if req.flagged { "flagged" } else { "unflagged" };
    tracing::info!(phone = %phone, action = %action, "Customer risk flag updated");
    state
        .sync
        .publish("customer", action, &phone, &shop.id, Some(&customer));

    Ok(ok(customer))
}
