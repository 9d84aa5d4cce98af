//! Shop Account Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::ShopInfo;

/// One account per shop — the tenant of every other collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopAccount {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,

    pub username: String,

    /// Argon2 PHC string
    pub password_hash: String,

    pub shop_name: String,

    pub created_at: i64,
}

impl ShopAccount {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Shop record key (tenant id)
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.key().to_string())
            .unwrap_or_default()
    }

    pub fn to_info(&self) -> ShopInfo {
        ShopInfo {
            id: self.key(),
            username: self.username.clone(),
            shop_name: self.shop_name.clone(),
        }
    }
}
