use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use crate::auth::JwtService;
use crate::core::{BackgroundTasks, Config, TaskKind};
use crate::devices::FeeTicker;
use crate::sync::SyncService;

/// Server state - shared handles to every service
///
/// Cloning is shallow: the database handle and services are internally
/// reference counted.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Immutable configuration |
/// | db | Surreal<Db> | Embedded database |
/// | jwt_service | Arc<JwtService> | JWT authentication |
/// | sync | SyncService | Realtime change feed |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub sync: SyncService,
    tasks: Arc<Mutex<BackgroundTasks>>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
            sync: SyncService::new(),
            tasks: Arc::new(Mutex::new(BackgroundTasks::new())),
        }
    }

    /// Initialize server state
    ///
    /// 1. Ensure the work directory layout exists
    /// 2. Open the embedded database and apply schema definitions
    /// 3. Construct services
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("station.db");
        let db = crate::db::connect(&db_path).await?;

        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));

        Ok(Self::new(config.clone(), db, jwt_service))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Start background tasks (fee ticker)
    pub async fn start_background_tasks(&self) {
        let mut tasks = self.tasks.lock().await;

        let ticker = FeeTicker::new(self.clone(), tasks.shutdown_token());
        tasks.spawn("fee_ticker", TaskKind::Periodic, ticker.run());

        tracing::info!("Background tasks started");
    }

    /// Signal all background tasks to stop and wait for them
    pub async fn shutdown_background_tasks(&self) {
        let mut tasks = self.tasks.lock().await;
        tasks.shutdown().await;
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("db", &"<Surreal<Db>>")
            .finish()
    }
}
