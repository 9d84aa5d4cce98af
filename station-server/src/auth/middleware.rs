//! Authentication middleware
//!
//! Extracts and validates the JWT from `Authorization: Bearer <token>` and
//! injects [`CurrentShop`] into request extensions.
//!
//! # Paths skipping authentication
//!
//! - `OPTIONS *` (CORS preflight)
//! - non-`/api/` paths
//! - `/api/auth/login`, `/api/auth/register`
//! - `/api/health`

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentShop, JwtService};
use crate::core::ServerState;

pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes fall through (404 as usual)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let is_public_api_route =
        path == "/api/auth/login" || path == "/api/auth/register" || path == "/api/health";
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let shop = CurrentShop::from(claims);
            req.extensions_mut().insert(shop);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Auth failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
