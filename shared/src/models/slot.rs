//! Slot Binding Models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Slot occupancy status, always consistent with `device` presence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Occupied,
}

impl Default for SlotStatus {
    fn default() -> Self {
        Self::Available
    }
}

/// Batch sticker registration payload
///
/// Creates `count` slot rows named `{prefix}{1..=count}` and returns the
/// QR payload strings to print.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SlotBatchRequest {
    #[validate(length(min = 1, max = 8, message = "Prefix must be 1-8 characters"))]
    pub prefix: String,

    #[validate(range(min = 1, max = 500, message = "Count must be 1-500"))]
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotBatchResponse {
    /// QR payloads, one per registered slot
    pub slots: Vec<String>,
}
