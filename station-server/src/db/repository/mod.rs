//! Repository Module
//!
//! CRUD operations per SurrealDB table.

pub mod customer;
pub mod device;
pub mod pos_transaction;
pub mod shop_account;
pub mod slot;

// Re-exports
pub use customer::CustomerRepository;
pub use device::DeviceRepository;
pub use pos_transaction::PosTransactionRepository;
pub use shop_account::ShopAccountRepository;
pub use slot::SlotRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Record id of a shop account from its key (tenant id)
pub fn shop_record_id(shop_key: &str) -> RecordId {
    RecordId::from_table_key("shop_account", shop_key)
}
