//! Realtime sync feed
//!
//! Every successful mutation publishes a [`SyncEvent`] on a broadcast
//! channel; connected terminals consume the feed over SSE
//! (`GET /api/sync/stream`) and the per-resource version lets them discard
//! stale updates after a reconnect.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::utils::time::now_millis;
use shared::SyncEvent;

/// Channel capacity: bursts of check-ins across a handful of terminals stay
/// far below this; laggy consumers skip ahead instead of blocking writers.
const SYNC_CHANNEL_CAPACITY: usize = 4096;

/// Resource kinds carried on the feed
pub const RESOURCES: &[&str] = &["device", "slot", "customer", "pos_transaction"];

/// Per-resource version counters
///
/// Lock-free concurrent map; each resource kind gets an independent,
/// atomically incremented version number.
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// Increment the resource's version and return the new value
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version of the resource, 0 if never published
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// Sync feed service
///
/// Clone-cheap handle over the broadcast sender and version map.
#[derive(Clone)]
pub struct SyncService {
    tx: broadcast::Sender<SyncEvent>,
    versions: Arc<ResourceVersions>,
}

impl SyncService {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(SYNC_CHANNEL_CAPACITY);
        Self {
            tx,
            versions: Arc::new(ResourceVersions::new()),
        }
    }

    /// Publish a change notification
    ///
    /// `id` is the record's domain key (order number, slot id, phone);
    /// `shop` scopes delivery to the owning tenant's subscribers.
    pub fn publish<T: Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        shop: &str,
        data: Option<&T>,
    ) {
        let event = SyncEvent {
            resource: resource.to_string(),
            action: action.to_string(),
            id: id.to_string(),
            shop: shop.to_string(),
            version: self.versions.increment(resource),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
            timestamp: now_millis(),
        };

        // Zero receivers is fine: nobody is watching right now
        let _ = self.tx.send(event);
    }

    /// Subscribe to the feed (all tenants; callers filter by shop)
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn versions(&self) -> &ResourceVersions {
        &self.versions
    }
}

impl Default for SyncService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_increment_independently() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("device"), 0);
        assert_eq!(versions.increment("device"), 1);
        assert_eq!(versions.increment("device"), 2);
        assert_eq!(versions.increment("slot"), 1);
        assert_eq!(versions.get("device"), 2);
    }

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let sync = SyncService::new();
        let mut rx = sync.subscribe();

        sync.publish("device", "created", "CS-0001", "shop1", Some(&serde_json::json!({"x": 1})));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.resource, "device");
        assert_eq!(event.action, "created");
        assert_eq!(event.id, "CS-0001");
        assert_eq!(event.shop, "shop1");
        assert_eq!(event.version, 1);
    }
}
