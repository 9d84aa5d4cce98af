//! Slot Binding Ledger
//!
//! Maps a physical slot id to at most one active device. The occupy write
//! is conditional on `status = 'available'`, so two check-ins claiming the
//! same bay resolve to one winner and one Conflict.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Slot;

const TABLE: &str = "slot";

#[derive(Clone)]
pub struct SlotRepository {
    base: BaseRepository,
}

impl SlotRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub fn record_id(slot_id: &str) -> RecordId {
        RecordId::from_table_key(TABLE, slot_id)
    }

    /// Create the slot row on first use, leaving an existing row untouched
    ///
    /// Ownership sticks with the first shop that registers the id; the
    /// caller checks `owner_shop` before going further.
    pub async fn ensure_registered(&self, slot_id: &str, shop: &RecordId) -> RepoResult<Slot> {
        let mut result = self
            .base
            .db()
            .query(
                "UPSERT $slot SET owner_shop = owner_shop ?? $shop, \
                 status = status ?? 'available' RETURN AFTER",
            )
            .bind(("slot", Self::record_id(slot_id)))
            .bind(("shop", shop.clone()))
            .await?;
        let rows: Vec<Slot> = result.take(0)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RepoError::Database(format!("Failed to register slot {}", slot_id)))
    }

    /// Bind a device to a slot
    ///
    /// Registers the row on first use, then occupies it only if currently
    /// available. An occupied slot is a Duplicate error; a slot registered
    /// to another shop is NotFound.
    pub async fn occupy(
        &self,
        slot_id: &str,
        shop: &RecordId,
        device: RecordId,
    ) -> RepoResult<Slot> {
        let existing = self.ensure_registered(slot_id, shop).await?;
        if &existing.owner_shop != shop {
            return Err(RepoError::NotFound(format!(
                "Slot {} is not registered to this shop",
                slot_id
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $slot SET device = $device, status = 'occupied' \
                 WHERE status = 'available' RETURN AFTER",
            )
            .bind(("slot", Self::record_id(slot_id)))
            .bind(("device", device))
            .await?;
        let rows: Vec<Slot> = result.take(0)?;
        rows.into_iter().next().ok_or_else(|| {
            RepoError::Duplicate(format!("Slot {} is already occupied", slot_id))
        })
    }

    /// Release a slot back to available; idempotent
    ///
    /// Returns None when the slot id is unknown or owned by another shop.
    pub async fn release(&self, slot_id: &str, shop: &RecordId) -> RepoResult<Option<Slot>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $slot SET device = NONE, status = 'available' \
                 WHERE owner_shop = $shop RETURN AFTER",
            )
            .bind(("slot", Self::record_id(slot_id)))
            .bind(("shop", shop.clone()))
            .await?;
        let rows: Vec<Slot> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn find_by_id(&self, slot_id: &str) -> RepoResult<Option<Slot>> {
        let slot: Option<Slot> = self.base.db().select(Self::record_id(slot_id)).await?;
        Ok(slot)
    }

    /// All slots registered to a shop
    pub async fn find_by_shop(&self, shop: &RecordId) -> RepoResult<Vec<Slot>> {
        let slots: Vec<Slot> = self
            .base
            .db()
            .query("SELECT * FROM slot WHERE owner_shop = $shop")
            .bind(("shop", shop.clone()))
            .await?
            .take(0)?;
        Ok(slots)
    }

    /// Bulk-erase: delete every slot of a shop, returning the count
    pub async fn erase_by_shop(&self, shop: &RecordId) -> RepoResult<usize> {
        let mut result = self
            .base
            .db()
            .query("DELETE slot WHERE owner_shop = $shop RETURN BEFORE")
            .bind(("shop", shop.clone()))
            .await?;
        let rows: Vec<Slot> = result.take(0)?;
        Ok(rows.len())
    }
}
