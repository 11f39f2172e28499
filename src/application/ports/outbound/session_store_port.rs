use async_trait::async_trait;

use crate::domain::value_objects::Session;

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of the session bound to a request token.
///
/// Sessions are created and destroyed by the authentication surface; the
/// engine never writes them.
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    async fn get_session(&self, token: &str) -> Result<Option<Session>, SessionStoreError>;
}
