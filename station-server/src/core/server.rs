//! Server Implementation
//!
//! HTTP server startup and shutdown management.

use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::{Config, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (shared with tests / embedding)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Build the full application router for the given state
    pub fn build_router(state: ServerState) -> Router {
        Router::new()
            .merge(crate::api::health::router())
            .merge(crate::api::auth::router())
            .merge(crate::api::devices::router())
            .merge(crate::api::slots::router())
            .merge(crate::api::customers::router())
            .merge(crate::api::pos::router())
            .merge(crate::api::maintenance::router())
            .merge(crate::api::sync::router())
            .layer(middleware::from_fn_with_state(
                state.clone(),
                crate::auth::require_auth,
            ))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
            .with_state(state)
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        state.start_background_tasks().await;

        let app = Self::build_router(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Station server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        state.shutdown_background_tasks().await;

        Ok(())
    }
}
