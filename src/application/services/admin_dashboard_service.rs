//! Admin dashboard service - aggregates the data shown on the admin page
//!
//! The three reads are independent and issued together; the payload only
//! exists once all of them have succeeded.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::dto::PlayerName;
use crate::application::ports::outbound::{AdminReadRepositoryPort, RepositoryError};
use crate::domain::entities::{
    EnvironmentConfig, PlayerNote, PlayerRecord, PlayerRole, DISPLAY_NAME_INFO, ENVIRONMENT_KEY,
};
use crate::domain::value_objects::PlayerId;

/// Data handed to the admin page, built once per request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDataPayload {
    pub environment: Option<EnvironmentConfig>,
    pub players: Vec<PlayerRecord>,
    pub notes: Option<PlayerNote>,
}

impl PageDataPayload {
    /// `{id, name}` pairs for the combat container and the dice list
    pub fn player_names(&self) -> Vec<PlayerName> {
        self.players.iter().map(PlayerName::from).collect()
    }
}

pub struct AdminDashboardService {
    repository: Arc<dyn AdminReadRepositoryPort>,
    info_names: Vec<String>,
}

impl AdminDashboardService {
    pub fn new(repository: Arc<dyn AdminReadRepositoryPort>) -> Self {
        Self::with_info_names(repository, vec![DISPLAY_NAME_INFO.to_string()])
    }

    /// Restrict the roster's info entries to the given info-names
    pub fn with_info_names(
        repository: Arc<dyn AdminReadRepositoryPort>,
        info_names: Vec<String>,
    ) -> Self {
        Self {
            repository,
            info_names,
        }
    }

    #[instrument(skip(self), fields(actor_id = %actor_id))]
    pub async fn load(&self, actor_id: &PlayerId) -> Result<PageDataPayload, RepositoryError> {
        let (environment, players, notes) = tokio::try_join!(
            self.repository.get_config(ENVIRONMENT_KEY),
            self.repository.list_players(PlayerRole::Player, &self.info_names),
            self.repository.get_note(actor_id),
        )?;

        debug!(
            players = players.len(),
            has_environment = environment.is_some(),
            has_notes = notes.is_some(),
            "Loaded admin dashboard data"
        );

        Ok(PageDataPayload {
            environment,
            players,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use crate::domain::entities::{Info, PlayerInfo};
    use crate::domain::value_objects::InfoId;
    use crate::infrastructure::persistence::InMemoryRepository;

    fn info(id: &str, name: &str, value: &str) -> PlayerInfo {
        PlayerInfo {
            info: Info {
                id: InfoId::new(id),
                name: name.to_string(),
            },
            value: value.to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_admin_scenario() {
        let repository = InMemoryRepository::new()
            .with_config(EnvironmentConfig::environment("forest"))
            .with_player(
                PlayerRole::Player,
                PlayerRecord::new("p1").with_info(info("1", "Nome", "Aria")),
            );
        let service = AdminDashboardService::new(Arc::new(repository));

        let payload = service.load(&PlayerId::new("p1")).await.unwrap();

        assert_eq!(payload.environment, Some(EnvironmentConfig::environment("forest")));
        assert_eq!(payload.players.len(), 1);
        assert!(payload.notes.is_none());
        assert_eq!(
            payload.player_names(),
            vec![PlayerName {
                id: "p1".to_string(),
                name: "Aria".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_roster_excludes_admins_and_filters_info() {
        let repository = InMemoryRepository::new()
            .with_player(PlayerRole::Admin, PlayerRecord::new("gm"))
            .with_player(
                PlayerRole::Player,
                PlayerRecord::new("p2")
                    .with_info(info("1", "Nome", "Bento"))
                    .with_info(info("2", "Idade", "40")),
            )
            .with_note(PlayerNote {
                player_id: PlayerId::new("gm"),
                value: "Sessão 12".to_string(),
            });
        let service = AdminDashboardService::new(Arc::new(repository));

        let payload = service.load(&PlayerId::new("gm")).await.unwrap();

        assert_eq!(payload.players.len(), 1);
        assert_eq!(payload.players[0].id, PlayerId::new("p2"));
        assert_eq!(payload.players[0].info.len(), 1);
        assert_eq!(payload.players[0].info[0].info.name, "Nome");
        assert_eq!(payload.notes.map(|n| n.value), Some("Sessão 12".to_string()));
    }

    #[tokio::test]
    async fn test_missing_name_uses_fallback() {
        let repository = InMemoryRepository::new()
            .with_player(PlayerRole::Player, PlayerRecord::new("p3"));
        let service = AdminDashboardService::new(Arc::new(repository));

        let payload = service.load(&PlayerId::new("gm")).await.unwrap();

        assert_eq!(payload.player_names()[0].name, "Desconhecido");
    }

    struct FailingRoster;

    #[async_trait]
    impl AdminReadRepositoryPort for FailingRoster {
        async fn get_config(
            &self,
            _key: &str,
        ) -> Result<Option<EnvironmentConfig>, RepositoryError> {
            Ok(Some(EnvironmentConfig::environment("idle")))
        }

        async fn list_players(
            &self,
            _role: PlayerRole,
            _info_names: &[String],
        ) -> Result<Vec<PlayerRecord>, RepositoryError> {
            Err(RepositoryError::Database("connection reset".to_string()))
        }

        async fn get_note(
            &self,
            _player_id: &PlayerId,
        ) -> Result<Option<PlayerNote>, RepositoryError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_any_failed_query_fails_the_load() {
        let service = AdminDashboardService::new(Arc::new(FailingRoster));

        let result = service.load(&PlayerId::new("gm")).await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }

    /// Every query waits for the other two, so sequential issuing would hang
    struct RendezvousRepository {
        barrier: Barrier,
    }

    #[async_trait]
    impl AdminReadRepositoryPort for RendezvousRepository {
        async fn get_config(
            &self,
            key: &str,
        ) -> Result<Option<EnvironmentConfig>, RepositoryError> {
            self.barrier.wait().await;
            Ok(Some(EnvironmentConfig {
                key: key.to_string(),
                value: "combat".to_string(),
            }))
        }

        async fn list_players(
            &self,
            _role: PlayerRole,
            _info_names: &[String],
        ) -> Result<Vec<PlayerRecord>, RepositoryError> {
            self.barrier.wait().await;
            Ok(Vec::new())
        }

        async fn get_note(
            &self,
            player_id: &PlayerId,
        ) -> Result<Option<PlayerNote>, RepositoryError> {
            self.barrier.wait().await;
            Ok(Some(PlayerNote {
                player_id: player_id.clone(),
                value: String::new(),
            }))
        }
    }

    #[tokio::test]
    async fn test_queries_run_concurrently() {
        let service = AdminDashboardService::new(Arc::new(RendezvousRepository {
            barrier: Barrier::new(3),
        }));

        let actor = PlayerId::new("gm");
        let payload = tokio::time::timeout(Duration::from_secs(2), service.load(&actor))
            .await
            .expect("queries were not issued concurrently")
            .unwrap();

        assert_eq!(payload.environment.map(|e| e.value), Some("combat".to_string()));
        assert!(payload.notes.is_some());
    }
}
