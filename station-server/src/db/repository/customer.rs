//! Customer Trust Directory
//!
//! Visit recording is a single upsert, so `visit_count` is exactly the
//! number of recorded visits no matter how many terminals write at once.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Customer;

const TABLE: &str = "customer";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub fn record_id(shop_key: &str, phone: &str) -> RecordId {
        RecordId::from_table_key(TABLE, Customer::key(shop_key, phone))
    }

    /// Record a visit: create-on-first-encounter, increment `visit_count`,
    /// refresh `last_visit`, overwrite the display name
    pub async fn record_visit(
        &self,
        shop: &RecordId,
        shop_key: &str,
        phone: &str,
        name: &str,
        now: i64,
    ) -> RepoResult<Customer> {
        let mut result = self
            .base
            .db()
            .query(
                "UPSERT $cust SET shop = $shop, phone = $phone, name = $name, \
                 last_visit = $now, visit_count += 1, \
                 is_bad_actor = is_bad_actor ?? false RETURN AFTER",
            )
            .bind(("cust", Self::record_id(shop_key, phone)))
            .bind(("shop", shop.clone()))
            .bind(("phone", phone.to_string()))
            .bind(("name", name.to_string()))
            .bind(("now", now))
            .await?;
        let rows: Vec<Customer> = result.take(0)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RepoError::Database(format!("Failed to record visit for {}", phone)))
    }

    /// Set or clear the risk flag; the reason is stored only while flagged
    pub async fn set_risk_flag(
        &self,
        shop_key: &str,
        phone: &str,
        flagged: bool,
        reason: Option<String>,
    ) -> RepoResult<Customer> {
        let reason = if flagged { reason } else { None };
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $cust SET is_bad_actor = $flagged, \
                 bad_actor_reason = $reason RETURN AFTER",
            )
            .bind(("cust", Self::record_id(shop_key, phone)))
            .bind(("flagged", flagged))
            .bind(("reason", reason))
            .await?;
        let rows: Vec<Customer> = result.take(0)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Customer {}", phone)))
    }

    pub async fn find_by_phone(&self, shop_key: &str, phone: &str) -> RepoResult<Option<Customer>> {
        let customer: Option<Customer> = self
            .base
            .db()
            .select(Self::record_id(shop_key, phone))
            .await?;
        Ok(customer)
    }

    /// Directory listing, most recent visitors first
    pub async fn find_by_shop(&self, shop: &RecordId) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE shop = $shop ORDER BY last_visit DESC")
            .bind(("shop", shop.clone()))
            .await?
            .take(0)?;
        Ok(customers)
    }

    /// Bulk-erase: delete every customer of a shop, returning the count
    pub async fn erase_by_shop(&self, shop: &RecordId) -> RepoResult<usize> {
        let mut result = self
            .base
            .db()
            .query("DELETE customer WHERE shop = $shop RETURN BEFORE")
            .bind(("shop", shop.clone()))
            .await?;
        let rows: Vec<Customer> = result.take(0)?;
        Ok(rows.len())
    }
}
