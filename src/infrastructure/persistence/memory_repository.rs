//! In-memory backend for the sheet store and the session store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{
    AdminReadRepositoryPort, AdminWriteRepositoryPort, RepositoryError, SessionStoreError,
    SessionStorePort,
};
use crate::domain::entities::{EnvironmentConfig, PlayerNote, PlayerRecord, PlayerRole};
use crate::domain::value_objects::{PlayerId, Session};

#[derive(Default)]
struct Tables {
    config: HashMap<String, EnvironmentConfig>,
    players: Vec<(PlayerRole, PlayerRecord)>,
    notes: HashMap<PlayerId, PlayerNote>,
}

/// Sheet store kept entirely in memory
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: EnvironmentConfig) -> Self {
        self.tables
            .get_mut()
            .config
            .insert(config.key.clone(), config);
        self
    }

    /// Add a player; a record with the same id is replaced
    pub fn with_player(mut self, role: PlayerRole, player: PlayerRecord) -> Self {
        let players = &mut self.tables.get_mut().players;
        players.retain(|(_, existing)| existing.id != player.id);
        players.push((role, player));
        self
    }

    pub fn with_note(mut self, note: PlayerNote) -> Self {
        self.tables
            .get_mut()
            .notes
            .insert(note.player_id.clone(), note);
        self
    }
}

#[async_trait]
impl AdminReadRepositoryPort for InMemoryRepository {
    async fn get_config(&self, key: &str) -> Result<Option<EnvironmentConfig>, RepositoryError> {
        Ok(self.tables.read().await.config.get(key).cloned())
    }

    async fn list_players(
        &self,
        role: PlayerRole,
        info_names: &[String],
    ) -> Result<Vec<PlayerRecord>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut players: Vec<PlayerRecord> = tables
            .players
            .iter()
            .filter(|(player_role, _)| *player_role == role)
            .map(|(_, player)| {
                let mut player = player.clone();
                player
                    .info
                    .retain(|entry| info_names.iter().any(|name| *name == entry.info.name));
                player
            })
            .collect();
        players.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(players)
    }

    async fn get_note(&self, player_id: &PlayerId) -> Result<Option<PlayerNote>, RepositoryError> {
        Ok(self.tables.read().await.notes.get(player_id).cloned())
    }
}

#[async_trait]
impl AdminWriteRepositoryPort for InMemoryRepository {
    async fn save_config(&self, config: &EnvironmentConfig) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .config
            .insert(config.key.clone(), config.clone());
        Ok(())
    }

    async fn save_note(&self, note: &PlayerNote) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .notes
            .insert(note.player_id.clone(), note.clone());
        Ok(())
    }
}

/// Session store kept in memory, keyed by token
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, token: impl Into<String>, session: Session) {
        self.sessions.write().await.insert(token.into(), session);
    }

    pub async fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.write().await.remove(token)
    }
}

#[async_trait]
impl SessionStorePort for InMemorySessionStore {
    async fn get_session(&self, token: &str) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.sessions.read().await.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = InMemorySessionStore::new();
        assert!(store.get_session("abc").await.unwrap().is_none());

        store.insert("abc", Session::admin("gm")).await;
        assert_eq!(store.get_session("abc").await.unwrap(), Some(Session::admin("gm")));

        store.remove("abc").await;
        assert!(store.get_session("abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_player_with_same_id_is_replaced() {
        let repository = InMemoryRepository::new()
            .with_player(PlayerRole::Player, PlayerRecord::new("p1"))
            .with_player(PlayerRole::Admin, PlayerRecord::new("p1"));

        let roster = repository.list_players(PlayerRole::Player, &[]).await.unwrap();
        assert!(roster.is_empty());
    }
}
