//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine). Collections:
//!
//! | Table | Record key | Contents |
//! |-------|------------|----------|
//! | `shop_account` | random | one account per shop (the tenant) |
//! | `device` | `{shop}_{order_no}` | checked-in devices |
//! | `slot` | slot id (global namespace) | physical charging bays |
//! | `customer` | `{shop}_{phone}` | trust directory |
//! | `pos_transaction` | random | walk-in sales |
//! | `counter` | shop key | order-number sequence |

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Open the embedded database and apply schema definitions
pub async fn connect(path: &Path) -> anyhow::Result<Surreal<Db>> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(path).await?;
    db.use_ns("chargestation").use_db("station").await?;

    define_schema(&db).await?;

    tracing::info!("Database ready at {}", path.display());
    Ok(db)
}

/// Idempotent schema definitions
///
/// Tables are schemaless; only the indexes that back uniqueness and the
/// hot dashboard queries are defined.
pub async fn define_schema(db: &Surreal<Db>) -> anyhow::Result<()> {
    db.query("DEFINE INDEX IF NOT EXISTS shop_account_username ON shop_account FIELDS username UNIQUE")
        .await?;
    db.query("DEFINE INDEX IF NOT EXISTS device_shop_status ON device FIELDS shop, status")
        .await?;
    db.query("DEFINE INDEX IF NOT EXISTS customer_shop ON customer FIELDS shop")
        .await?;
    db.query("DEFINE INDEX IF NOT EXISTS pos_shop_created ON pos_transaction FIELDS shop, created_at")
        .await?;
    Ok(())
}
