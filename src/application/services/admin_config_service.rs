//! Admin config service - environment switch and admin annotations

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::ports::outbound::{AdminWriteRepositoryPort, RepositoryError};
use crate::domain::entities::{EnvironmentConfig, PlayerNote};
use crate::domain::value_objects::PlayerId;

const MAX_ENVIRONMENT_LENGTH: usize = 64;
const MAX_NOTE_LENGTH: usize = 20_000;

#[derive(Debug, thiserror::Error)]
pub enum AdminConfigError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct AdminConfigService {
    repository: Arc<dyn AdminWriteRepositoryPort>,
}

impl AdminConfigService {
    pub fn new(repository: Arc<dyn AdminWriteRepositoryPort>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn set_environment(
        &self,
        value: &str,
    ) -> Result<EnvironmentConfig, AdminConfigError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AdminConfigError::Validation(
                "Environment cannot be empty".to_string(),
            ));
        }
        if value.len() > MAX_ENVIRONMENT_LENGTH {
            return Err(AdminConfigError::Validation(format!(
                "Environment cannot exceed {} characters",
                MAX_ENVIRONMENT_LENGTH
            )));
        }

        let config = EnvironmentConfig::environment(value);
        self.repository.save_config(&config).await?;
        info!(environment = %config.value, "Environment updated");
        Ok(config)
    }

    #[instrument(skip(self, value), fields(actor_id = %actor_id))]
    pub async fn save_note(
        &self,
        actor_id: &PlayerId,
        value: &str,
    ) -> Result<PlayerNote, AdminConfigError> {
        if value.len() > MAX_NOTE_LENGTH {
            return Err(AdminConfigError::Validation(format!(
                "Note cannot exceed {} characters",
                MAX_NOTE_LENGTH
            )));
        }

        let note = PlayerNote {
            player_id: actor_id.clone(),
            value: value.to_string(),
        };
        self.repository.save_note(&note).await?;
        Ok(note)
    }
}
