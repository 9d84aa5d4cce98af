//! POS Transaction Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use validator::Validate;

use crate::auth::CurrentShop;
use crate::core::ServerState;
use crate::db::models::PosTransaction;
use crate::db::repository::{CustomerRepository, PosTransactionRepository, shop_record_id};
use crate::utils::error::{AppError, AppResponse, ok};
use crate::utils::result::AppResult;
use crate::utils::time::now_millis;
use shared::models::{PosCreate, PosListQuery};

/// POST /api/pos - create a walk-in sale
///
/// A payload carrying a customer phone also records a directory visit,
/// exactly like a device check-in. The visit is best-effort: a directory
/// failure is logged but never voids the committed sale.
pub async fn create(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Json(req): Json<PosCreate>,
) -> AppResult<Json<AppResponse<PosTransaction>>> {
    req.validate()?;
    if req.amount <= Decimal::ZERO {
        return Err(AppError::validation("Amount must be positive"));
    }

    let shop_id = shop_record_id(&shop.id);
    let now = now_millis();

    let repo = PosTransactionRepository::new(state.get_db());
    let created = repo
        .create(PosTransaction {
            id: None,
            shop: shop_id.clone(),
            amount: req.amount,
            payment_method: req.payment_method,
            description: req.description,
            customer_phone: req.customer_phone.clone(),
            customer_name: req.customer_name.clone(),
            created_at: now,
        })
        .await?;

    if let Some(phone) = &req.customer_phone {
        let customers = CustomerRepository::new(state.get_db());
        let name = req.customer_name.as_deref().unwrap_or_default();
        match customers
            .record_visit(&shop_id, &shop.id, phone, name, now)
            .await
        {
            Ok(customer) => {
                state
                    .sync
                    .publish("customer", "visited", phone, &shop.id, Some(&customer));
            }
            Err(e) => {
                tracing::warn!(phone = %phone, error = %e, "Failed to record customer visit");
            }
        }
    }

    tracing::info!(
        amount = %created.amount,
        method = ?created.payment_method,
        "POS transaction created"
    );
    state.sync.publish(
        "pos_transaction",
        "created",
        &created
            .id
            .as_ref()
            .map(|id| id.key().to_string())
            .unwrap_or_default(),
        &shop.id,
        Some(&created),
    );

    Ok(ok(created))
}

/// GET /api/pos?from=&to= - transactions in `[from, to)`, newest first
///
/// Bounds default to all-time when omitted.
pub async fn list(
    State(state): State<ServerState>,
    shop: CurrentShop,
    Query(query): Query<PosListQuery>,
) -> AppResult<Json<AppResponse<Vec<PosTransaction>>>> {
    let repo = PosTransactionRepository::new(state.get_db());
    let txs = repo
        .find_by_shop_range(
            &shop_record_id(&shop.id),
            query.from.unwrap_or(0),
            query.to.unwrap_or(i64::MAX),
        )
        .await?;
    Ok(ok(txs))
}
