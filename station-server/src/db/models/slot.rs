//! Slot Binding Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::SlotStatus;

/// A physical charging bay identified by a printed QR code
///
/// Record key is the slot id itself; slot ids live in a global namespace
/// and `owner_shop` scopes them back to a tenant. The ledger invariant:
/// at most one active device references a slot, enforced by conditional
/// occupy writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,

    /// Shop that printed/registered this sticker
    #[serde(with = "serde_helpers::record_id")]
    pub owner_shop: RecordId,

    /// Currently occupying device; NONE means available
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub device: Option<RecordId>,

    #[serde(default)]
    pub status: SlotStatus,
}

impl Slot {
    /// The printed slot id (record key)
    pub fn slot_id(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.key().to_string())
            .unwrap_or_default()
    }
}
