//! POS Transaction Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payment method for a walk-in sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Pos,
}

/// Create a POS transaction
///
/// A payload carrying a customer phone also records a directory visit,
/// same as a device check-in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PosCreate {
    pub amount: Decimal,

    pub payment_method: PaymentMethod,

    pub description: Option<String>,

    #[validate(length(min = 10, max = 15, message = "Phone must be 10-15 digits"))]
    pub customer_phone: Option<String>,

    pub customer_name: Option<String>,
}

/// Date-range filter (Unix millis, inclusive from / exclusive to)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PosListQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
}
