//! Shop Account Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::ShopAccount;

const TABLE: &str = "shop_account";

#[derive(Clone)]
pub struct ShopAccountRepository {
    base: BaseRepository,
}

impl ShopAccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new shop account
    ///
    /// The unique index on `username` backs this up against races; the
    /// pre-check just gives a friendlier error.
    pub async fn create(&self, account: ShopAccount) -> RepoResult<ShopAccount> {
        if self.find_by_username(&account.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' is already taken",
                account.username
            )));
        }

        let created: Option<ShopAccount> = self.base.db().create(TABLE).content(account).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create shop account".to_string()))
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<ShopAccount>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM shop_account WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?;
        let accounts: Vec<ShopAccount> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    pub async fn find_by_key(&self, shop_key: &str) -> RepoResult<Option<ShopAccount>> {
        let account: Option<ShopAccount> = self
            .base
            .db()
            .select(super::shop_record_id(shop_key))
            .await?;
        Ok(account)
    }
}
