//! Shared application state

use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::sync::RwLock;

use crate::application::ports::outbound::{
    AdminReadRepositoryPort, AdminWriteRepositoryPort, SessionStorePort,
};
use crate::application::services::{AdminConfigService, AdminDashboardService};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::{
    connect_sqlite, InMemoryRepository, InMemorySessionStore, SqliteRepository,
    SqliteSessionStore,
};
use crate::infrastructure::rooms::RoomHub;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub sessions: Arc<dyn SessionStorePort>,
    /// Connected realtime clients and their rooms
    pub rooms: Arc<RwLock<RoomHub>>,
    // Application services
    pub dashboard_service: AdminDashboardService,
    pub admin_config_service: AdminConfigService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let backend = config.persistence_backend.clone();
        match backend.as_str() {
            "sqlite" => {
                let pool =
                    connect_sqlite(&config.database_url, config.database_max_connections).await?;
                let repository = Arc::new(SqliteRepository::new(pool.clone()));
                let sessions = Arc::new(SqliteSessionStore::new(pool));
                Ok(Self::from_parts(config, repository.clone(), repository, sessions))
            }
            "memory" => {
                tracing::warn!("Using in-memory persistence; data is lost on shutdown");
                let repository = Arc::new(InMemoryRepository::new());
                let sessions = Arc::new(InMemorySessionStore::new());
                Ok(Self::from_parts(config, repository.clone(), repository, sessions))
            }
            other => bail!("Unknown persistence backend: {}", other),
        }
    }

    pub fn from_parts(
        config: AppConfig,
        reads: Arc<dyn AdminReadRepositoryPort>,
        writes: Arc<dyn AdminWriteRepositoryPort>,
        sessions: Arc<dyn SessionStorePort>,
    ) -> Self {
        let dashboard_service =
            AdminDashboardService::with_info_names(reads, config.info_allow_list.clone());
        let admin_config_service = AdminConfigService::new(writes);

        Self {
            config,
            sessions,
            rooms: Arc::new(RwLock::new(RoomHub::new())),
            dashboard_service,
            admin_config_service,
        }
    }
}
