//! Repository ports - Interfaces for sheet persistence
//!
//! The dashboard only reads through [`AdminReadRepositoryPort`]; admin
//! mutations go through [`AdminWriteRepositoryPort`]. Both are implemented
//! by the SQLite adapter and by the in-memory backend used in tests.

use async_trait::async_trait;

use crate::domain::entities::{EnvironmentConfig, PlayerNote, PlayerRecord, PlayerRole};
use crate::domain::value_objects::PlayerId;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Read side of the sheet store
#[async_trait]
pub trait AdminReadRepositoryPort: Send + Sync {
    /// Get a configuration row by its unique key
    async fn get_config(&self, key: &str) -> Result<Option<EnvironmentConfig>, RepositoryError>;

    /// List every player with the given role, including nested sheet data.
    ///
    /// Info entries are limited to those whose info-name is in `info_names`.
    async fn list_players(
        &self,
        role: PlayerRole,
        info_names: &[String],
    ) -> Result<Vec<PlayerRecord>, RepositoryError>;

    /// Get the note of a player by its unique player id
    async fn get_note(&self, player_id: &PlayerId) -> Result<Option<PlayerNote>, RepositoryError>;
}

/// Write side of the sheet store
#[async_trait]
pub trait AdminWriteRepositoryPort: Send + Sync {
    /// Insert or replace a configuration row
    async fn save_config(&self, config: &EnvironmentConfig) -> Result<(), RepositoryError>;

    /// Insert or replace the note of a player
    async fn save_note(&self, note: &PlayerNote) -> Result<(), RepositoryError>;
}
