//! Persistence adapters
//!
//! SQLite (sqlx) is the production store; the in-memory backend implements
//! the same ports for tests and local runs.

mod memory_repository;
mod schema;
mod session_store;
mod sqlite_repository;

pub use memory_repository::{InMemoryRepository, InMemorySessionStore};
pub use session_store::SqliteSessionStore;
pub use sqlite_repository::SqliteRepository;

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{RepositoryError, SessionStoreError};

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<sqlx::Error> for SessionStoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}

/// Open the SQLite pool and make sure every table exists
pub async fn connect_sqlite(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
        .with_context(|| format!("Failed to open SQLite database at {}", url))?;

    schema::initialize(&pool)
        .await
        .context("Failed to initialize SQLite schema")?;

    Ok(pool)
}
