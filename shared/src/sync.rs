//! Realtime Sync Events
//!
//! Every successful mutation publishes a [`SyncEvent`] on the server's
//! broadcast feed. Clients consume the feed over SSE and use the
//! per-resource `version` to discard stale updates after reconnects.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single resource change notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncEvent {
    /// Resource kind: "device" | "slot" | "customer" | "pos_transaction"
    pub resource: String,

    /// What happened: "created" | "updated" | "collected" | "released" | "fee_tick" | ...
    pub action: String,

    /// Domain key of the affected record (order number, slot id, phone)
    pub id: String,

    /// Owning shop — consumers only see events for their own tenant
    pub shop: String,

    /// Monotonically increasing per-resource version
    pub version: u64,

    /// Snapshot of the record after the change, when cheap to include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Unix millis
    pub timestamp: i64,
}

/// Snapshot of the feed's version counters
///
/// Fetched on reconnect: a version ahead of the client's last-seen value
/// means that resource must be refreshed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatus {
    /// Current version per resource kind
    pub versions: HashMap<String, u64>,
}
