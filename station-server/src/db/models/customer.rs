//! Customer Profile Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Per-shop customer trust record, keyed by phone number
///
/// Created implicitly on first visit. `visit_count` only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,

    /// Owning shop (tenant)
    #[serde(with = "serde_helpers::record_id")]
    pub shop: RecordId,

    pub phone: String,

    /// Last-known display name, overwritten on every visit
    pub name: String,

    #[serde(default)]
    pub visit_count: i64,

    /// Unix millis of the most recent visit
    pub last_visit: i64,

    #[serde(default)]
    pub is_bad_actor: bool,

    /// Present only while flagged
    pub bad_actor_reason: Option<String>,
}

impl Customer {
    /// Record key for a shop's customer
    pub fn key(shop_key: &str, phone: &str) -> String {
        format!("{}_{}", shop_key, phone)
    }
}
