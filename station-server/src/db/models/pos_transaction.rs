//! POS Transaction Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::PaymentMethod;

/// A walk-in sale rung up at the front desk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosTransaction {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,

    /// Owning shop (tenant)
    #[serde(with = "serde_helpers::record_id")]
    pub shop: RecordId,

    pub amount: Decimal,

    pub payment_method: PaymentMethod,

    pub description: Option<String>,

    /// A phone here also records a directory visit
    pub customer_phone: Option<String>,
    pub customer_name: Option<String>,

    pub created_at: i64,
}
