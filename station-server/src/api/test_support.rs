//! Shared fixtures for handler tests
//!
//! Handlers are exercised directly with extractor values instead of going
//! through the HTTP stack; the auth middleware has its own tests.

use std::sync::Arc;

use crate::auth::{CurrentShop, JwtConfig, JwtService};
use crate::core::{Config, ServerState};
use crate::db;

/// Fresh server state over a throwaway on-disk database
///
/// The TempDir must stay alive for the duration of the test.
pub async fn test_state() -> (ServerState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db = db::connect(&tmp.path().join("test.db")).await.unwrap();
    let config = Config::with_overrides(tmp.path().to_string_lossy().into_owned(), 0);
    let jwt_service = Arc::new(JwtService::new(JwtConfig {
        secret: "test-secret-test-secret-test-secret!".to_string(),
        expiration_minutes: 60,
        issuer: "station-server".to_string(),
    }));
    (ServerState::new(config, db, jwt_service), tmp)
}

pub fn test_shop() -> CurrentShop {
    CurrentShop {
        id: "shop1".to_string(),
        name: "Test Shop".to_string(),
    }
}

pub fn other_shop() -> CurrentShop {
    CurrentShop {
        id: "shop2".to_string(),
        name: "Other Shop".to_string(),
    }
}
