//! Device Check-in Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Device lifecycle status
///
/// `charging → ready → collected`, with `charging → collected` also
/// allowed for direct pickup. `collected` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Charging,
    Ready,
    Collected,
}

impl Default for DeviceStatus {
    fn default() -> Self {
        Self::Charging
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Charging => write!(f, "charging"),
            Self::Ready => write!(f, "ready"),
            Self::Collected => write!(f, "collected"),
        }
    }
}

/// Billing mode, fixed once at check-in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillingType {
    Fixed,
    Hourly,
}

/// Check-in payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckInRequest {
    /// What was left: "phone", "power bank", ...
    #[serde(default)]
    pub device_type: Option<String>,

    /// Required free-text description ("Tecno Spark, black case")
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub billing_type: BillingType,

    /// Flat fee, required when billing_type = fixed
    pub fixed_fee: Option<Decimal>,

    /// Per-hour rate, required when billing_type = hourly
    pub hourly_rate: Option<Decimal>,

    /// Physical charging bay to bind (QR payload)
    pub slot_id: Option<String>,

    /// Cosmetic physical-token label, no identity role
    pub tag_number: Option<String>,

    #[validate(length(min = 10, max = 15, message = "Phone must be 10-15 digits"))]
    pub customer_phone: Option<String>,

    pub customer_name: Option<String>,
}

/// Collect (checkout) payload
///
/// For slot-bound devices `proof_token` must carry the re-scanned slot id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectRequest {
    pub proof_token: Option<String>,
}

/// Device list filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceListQuery {
    pub status: Option<DeviceStatus>,
}
