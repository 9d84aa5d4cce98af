//! POS Transaction Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::PosTransaction;
use surrealdb::RecordId;

const TABLE: &str = "pos_transaction";

#[derive(Clone)]
pub struct PosTransactionRepository {
    base: BaseRepository,
}

impl PosTransactionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, tx: PosTransaction) -> RepoResult<PosTransaction> {
        let created: Option<PosTransaction> = self.base.db().create(TABLE).content(tx).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create transaction".to_string()))
    }

    /// Transactions of a shop in `[from, to)`, newest first
    pub async fn find_by_shop_range(
        &self,
        shop: &RecordId,
        from: i64,
        to: i64,
    ) -> RepoResult<Vec<PosTransaction>> {
        let txs: Vec<PosTransaction> = self
            .base
            .db()
            .query(
                "SELECT * FROM pos_transaction WHERE shop = $shop \
                 AND created_at >= $from AND created_at < $to \
                 ORDER BY created_at DESC",
            )
            .bind(("shop", shop.clone()))
            .bind(("from", from))
            .bind(("to", to))
            .await?
            .take(0)?;
        Ok(txs)
    }

    /// Bulk-erase: delete every transaction of a shop, returning the count
    pub async fn erase_by_shop(&self, shop: &RecordId) -> RepoResult<usize> {
        let mut result = self
            .base
            .db()
            .query("DELETE pos_transaction WHERE shop = $shop RETURN BEFORE")
            .bind(("shop", shop.clone()))
            .await?;
        let rows: Vec<PosTransaction> = result.take(0)?;
        Ok(rows.len())
    }
}
