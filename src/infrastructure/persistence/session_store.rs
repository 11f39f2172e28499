use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::application::ports::outbound::{SessionStoreError, SessionStorePort};
use crate::domain::value_objects::Session;

/// Reads sessions written by the authentication surface into `session`
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStorePort for SqliteSessionStore {
    async fn get_session(&self, token: &str) -> Result<Option<Session>, SessionStoreError> {
        let row: Option<(String, bool, Option<DateTime<Utc>>)> =
            sqlx::query_as("SELECT player_id, admin, expires_at FROM session WHERE token = ?")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.and_then(|(player_id, admin, expires_at)| match expires_at {
            Some(expires_at) if expires_at <= Utc::now() => {
                tracing::debug!("Session for player {} expired at {}", player_id, expires_at);
                None
            }
            _ => Some(Session::new(player_id, admin)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::connect_sqlite;

    #[tokio::test]
    async fn test_lookup_and_expiry() {
        let pool = connect_sqlite("sqlite::memory:", 1).await.unwrap();
        let past = Utc::now() - chrono::Duration::hours(1);
        let future = Utc::now() + chrono::Duration::hours(1);
        for (token, player, admin, expires_at) in [
            ("t-admin", "gm", true, Some(future)),
            ("t-player", "p1", false, None),
            ("t-old", "gm", true, Some(past)),
        ] {
            sqlx::query(
                "INSERT INTO session (token, player_id, admin, expires_at) VALUES (?, ?, ?, ?)",
            )
            .bind(token)
            .bind(player)
            .bind(admin)
            .bind(expires_at)
            .execute(&pool)
            .await
            .unwrap();
        }
        let store = SqliteSessionStore::new(pool);

        assert_eq!(store.get_session("t-admin").await.unwrap(), Some(Session::admin("gm")));
        assert_eq!(store.get_session("t-player").await.unwrap(), Some(Session::player("p1")));
        assert!(store.get_session("t-old").await.unwrap().is_none());
        assert!(store.get_session("missing").await.unwrap().is_none());
    }
}
