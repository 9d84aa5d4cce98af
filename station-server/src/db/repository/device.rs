//! Device Repository
//!
//! Lifecycle transitions are single conditional statements so that two
//! terminals racing on the same device resolve to exactly one winner.

use rust_decimal::Decimal;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Device;
use shared::models::DeviceStatus;

const TABLE: &str = "device";

#[derive(Deserialize)]
struct CounterRow {
    value: i64,
}

#[derive(Clone)]
pub struct DeviceRepository {
    base: BaseRepository,
}

impl DeviceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Record id for a shop's order number
    pub fn record_id(shop_key: &str, order_no: &str) -> RecordId {
        RecordId::from_table_key(TABLE, Device::key(shop_key, order_no))
    }

    /// Allocate the next order number for a shop (`CS-####`)
    ///
    /// Backed by an atomically incremented per-shop counter row; numbers
    /// are never reused, gaps from failed check-ins are fine.
    pub async fn next_order_no(&self, shop_key: &str) -> RepoResult<String> {
        let ctr = RecordId::from_table_key("counter", shop_key);
        let mut result = self
            .base
            .db()
            .query("UPSERT $ctr SET value += 1 RETURN AFTER")
            .bind(("ctr", ctr))
            .await?;
        let rows: Vec<CounterRow> = result.take(0)?;
        let value = rows
            .into_iter()
            .next()
            .map(|r| r.value)
            .ok_or_else(|| RepoError::Database("Counter increment returned nothing".to_string()))?;
        Ok(format!("CS-{:04}", value))
    }

    /// Create a device record under an explicit record id
    pub async fn create(&self, id: RecordId, device: Device) -> RepoResult<Device> {
        let created: Option<Device> = self.base.db().create(id).content(device).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create device".to_string()))
    }

    pub async fn find_by_order_no(
        &self,
        shop_key: &str,
        order_no: &str,
    ) -> RepoResult<Option<Device>> {
        let device: Option<Device> = self
            .base
            .db()
            .select(Self::record_id(shop_key, order_no))
            .await?;
        Ok(device)
    }

    pub async fn find_by_record(&self, id: RecordId) -> RepoResult<Option<Device>> {
        let device: Option<Device> = self.base.db().select(id).await?;
        Ok(device)
    }

    /// All devices of a shop, optionally filtered by status, newest first
    pub async fn find_by_shop(
        &self,
        shop: &RecordId,
        status: Option<DeviceStatus>,
    ) -> RepoResult<Vec<Device>> {
        let devices: Vec<Device> = match status {
            Some(status) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM device WHERE shop = $shop AND status = $status \
                         ORDER BY start_time DESC",
                    )
                    .bind(("shop", shop.clone()))
                    .bind(("status", status))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM device WHERE shop = $shop ORDER BY start_time DESC")
                    .bind(("shop", shop.clone()))
                    .await?
                    .take(0)?
            }
        };
        Ok(devices)
    }

    /// Active hourly-billed devices across all shops, for the fee ticker
    pub async fn find_active_hourly(&self) -> RepoResult<Vec<Device>> {
        let devices: Vec<Device> = self
            .base
            .db()
            .query("SELECT * FROM device WHERE status != 'collected' AND billing_type = 'hourly'")
            .await?
            .take(0)?;
        Ok(devices)
    }

    /// Conditional `charging → ready` transition
    ///
    /// Returns None when the device is not currently `charging` (caller
    /// distinguishes missing from wrong-state).
    pub async fn mark_ready(&self, id: RecordId, now: i64) -> RepoResult<Option<Device>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $device SET status = 'ready', updated_at = $now \
                 WHERE status = 'charging' RETURN AFTER",
            )
            .bind(("device", id))
            .bind(("now", now))
            .await?;
        let rows: Vec<Device> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Conditional terminal transition: freeze the fee, stamp `end_time`
    /// and clear the slot binding
    ///
    /// Succeeds only from `charging` or `ready`; a concurrent double-collect
    /// loses cleanly (returns None).
    pub async fn finalize_collection(
        &self,
        id: RecordId,
        now: i64,
        final_fee: Decimal,
    ) -> RepoResult<Option<Device>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $device SET status = 'collected', end_time = $now, \
                 final_fee = $fee, slot_id = NONE, updated_at = $now \
                 WHERE status IN ['charging', 'ready'] RETURN AFTER",
            )
            .bind(("device", id))
            .bind(("now", now))
            .bind(("fee", final_fee))
            .await?;
        let rows: Vec<Device> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Bulk-erase: delete every device of a shop, returning the count
    pub async fn erase_by_shop(&self, shop: &RecordId) -> RepoResult<usize> {
        let mut result = self
            .base
            .db()
            .query("DELETE device WHERE shop = $shop RETURN BEFORE")
            .bind(("shop", shop.clone()))
            .await?;
        let rows: Vec<Device> = result.take(0)?;
        Ok(rows.len())
    }

    /// Drop the shop's order-number counter (bulk-erase only)
    pub async fn delete_counter(&self, shop_key: &str) -> RepoResult<()> {
        let ctr = RecordId::from_table_key("counter", shop_key);
        let _: Option<serde_json::Value> = self.base.db().delete(ctr).await?;
        Ok(())
    }
}
