//! Authentication Handlers
//!
//! One account per shop; the account record key is the tenant id carried
//! in the token subject.

use std::time::Duration;

use axum::{Json, extract::State};
use validator::Validate;

use crate::auth::CurrentShop;
use crate::core::ServerState;
use crate::db::models::ShopAccount;
use crate::db::repository::ShopAccountRepository;
use crate::utils::error::{AppError, AppResponse, ok};
use crate::utils::result::AppResult;
use crate::utils::time::now_millis;
use shared::models::{AuthResponse, LoginRequest, RegisterRequest, ShopInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Register a new shop account and log it in
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AppResponse<AuthResponse>>> {
    req.validate()?;

    let repo = ShopAccountRepository::new(state.get_db());
    let password_hash = ShopAccount::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let account = ShopAccount {
        id: None,
        username: req.username,
        password_hash,
        shop_name: req.shop_name,
        created_at: now_millis(),
    };
    let created = repo.create(account).await?;

    let token = state
        .jwt_service
        .generate_token(&created.key(), &created.shop_name)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(username = %created.username, shop = %created.key(), "Shop registered");

    Ok(ok(AuthResponse {
        token,
        shop: created.to_info(),
    }))
}

/// Log in with username and password
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<AuthResponse>>> {
    let repo = ShopAccountRepository::new(state.get_db());
    let account = repo.find_by_username(&req.username).await?;

    // Fixed delay before checking the result, so hits and misses take the
    // same time
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(account) => account,
        None => {
            tracing::warn!(target: "security", username = %req.username, "Login failed - unknown user");
            return Err(AppError::invalid_credentials());
        }
    };

    let password_valid = account
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !password_valid {
        tracing::warn!(target: "security", username = %req.username, "Login failed - wrong password");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(&account.key(), &account.shop_name)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(username = %account.username, shop = %account.key(), "Shop logged in");

    Ok(ok(AuthResponse {
        token,
        shop: account.to_info(),
    }))
}

/// Identity of the authenticated shop
pub async fn me(
    State(state): State<ServerState>,
    shop: CurrentShop,
) -> AppResult<Json<AppResponse<ShopInfo>>> {
    let repo = ShopAccountRepository::new(state.get_db());
    let account = repo
        .find_by_key(&shop.id)
        .await?
        .ok_or_else(|| AppError::not_found("Shop account"))?;
    Ok(ok(account.to_info()))
}
