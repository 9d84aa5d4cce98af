//! Device Record Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::{BillingType, DeviceStatus};

/// A device left for charging
///
/// Record key is `{shop_key}_{order_no}`, so order numbers are unique per
/// shop for the lifetime of the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,

    /// Shop-scoped order identifier (`CS-####`), never reused
    pub order_no: String,

    /// Owning shop (tenant)
    #[serde(with = "serde_helpers::record_id")]
    pub shop: RecordId,

    /// What was left: "phone", "power bank", ...
    pub device_type: Option<String>,

    /// Required free-text description
    pub description: String,

    /// Bound physical slot, cleared at collection
    pub slot_id: Option<String>,

    /// Cosmetic physical-token label
    pub tag_number: Option<String>,

    pub billing_type: BillingType,

    /// Flat fee (billing_type = fixed)
    pub fixed_fee: Option<Decimal>,

    /// Per-hour rate (billing_type = hourly)
    pub hourly_rate: Option<Decimal>,

    /// Unix millis, set at check-in, immutable
    pub start_time: i64,

    /// Unix millis, set exactly once at collection
    pub end_time: Option<i64>,

    #[serde(default)]
    pub status: DeviceStatus,

    /// Fee frozen at collection; present iff status = collected
    pub final_fee: Option<Decimal>,

    /// Denormalized customer identity at check-in time
    pub customer_phone: Option<String>,
    pub customer_name: Option<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

impl Device {
    /// Record key for a shop's order
    pub fn key(shop_key: &str, order_no: &str) -> String {
        format!("{}_{}", shop_key, order_no)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, DeviceStatus::Charging | DeviceStatus::Ready)
    }
}
