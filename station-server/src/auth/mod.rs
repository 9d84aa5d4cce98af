//! Authentication module
//!
//! JWT shop-tenant authentication: one account per shop, the token subject
//! is the shop record key that scopes every other collection.

mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;

use serde::{Deserialize, Serialize};

/// Authenticated shop identity, injected into request extensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentShop {
    /// Shop record key (tenant id)
    pub id: String,
    /// Display name of the shop
    pub name: String,
}

impl From<Claims> for CurrentShop {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.shop_name,
        }
    }
}
