//! Shop Account Models
//!
//! Single owner-operator tenancy: the authenticated shop account IS the
//! tenant, and its record key scopes every other collection.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "Shop name is required"))]
    pub shop_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public shop identity (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopInfo {
    /// Shop record key — the tenant id
    pub id: String,
    pub username: String,
    pub shop_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub shop: ShopInfo,
}
