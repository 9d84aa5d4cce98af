//! ChargeStation Station Server - point-of-sale backend for phone-charging shops
//!
//! # Architecture overview
//!
//! Single-binary edge node: front-desk terminals talk to it over a REST API
//! and follow live changes through an SSE sync feed. State lives in an
//! embedded SurrealDB instance.
//!
//! - **Device lifecycle** (`devices`): check-in → ready → collected state
//!   machine and the billing accrual engine
//! - **Slot ledger** (`db::repository::slot`): binds a physical QR bay to at
//!   most one active device, gates checkout behind a re-scan
//! - **Customer directory** (`db::repository::customer`): visit counting and
//!   the bad-actor risk flag
//! - **Auth** (`auth`): JWT shop-tenant authentication
//! - **Sync** (`sync`): resource-versioned change feed
//!
//! # Module structure
//!
//! ```text
//! station-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── auth/          # JWT service, middleware, extractor
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # embedded SurrealDB, models, repositories
//! ├── devices/       # lifecycle manager, billing, fee ticker
//! ├── sync/          # realtime change feed
//! └── utils/         # errors, logging, time helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod devices;
pub mod sync;
pub mod utils;

// Re-export public types
pub use auth::{CurrentShop, JwtService};
pub use core::{Config, Server, ServerState};
pub use devices::DeviceLifecycle;
pub use sync::SyncService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and install the tracing subscriber
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ________
  / ____/ /_  ____ __________ ____
 / /   / __ \/ __ `/ ___/ __ `/ _ \
/ /___/ / / / /_/ / /  / /_/ /  __/
\____/_/ /_/\__,_/_/   \__, /\___/
   _____ __        __ /____/
  / ___// /_____ _/ /_(_)___  ____
  \__ \/ __/ __ `/ __/ / __ \/ __ \
 ___/ / /_/ /_/ / /_/ / /_/ / / / /
/____/\__/\__,_/\__/_/\____/_/ /_/
"#
    );
}
