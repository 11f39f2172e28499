//! Application configuration
//!
//! Defaults are layered under `SUNFLOWER_*` environment variables
//! (e.g. `SUNFLOWER_DATABASE_URL`, `SUNFLOWER_SERVER_PORT`).

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

/// Application configuration loaded from environment
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Persistence backend: "sqlite" or "memory"
    pub persistence_backend: String,
    /// SQLite connection URL
    pub database_url: String,
    /// Maximum pooled SQLite connections
    pub database_max_connections: u32,

    /// HTTP/WebSocket server port
    pub server_port: u16,

    /// Cookie carrying the session token
    pub session_cookie: String,
    /// Realtime room joined by admin clients
    pub admin_room: String,
    /// Info-names loaded with the roster
    pub info_allow_list: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_source(Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix("SUNFLOWER")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("info_allow_list")
    }

    fn from_source(environment: Environment) -> Result<Self> {
        Config::builder()
            .set_default("persistence_backend", "sqlite")?
            .set_default("database_url", "sqlite://sunflower.db?mode=rwc")?
            .set_default("database_max_connections", 5)?
            .set_default("server_port", 3000)?
            .set_default("session_cookie", "sunflower_session")?
            .set_default("admin_room", "admin")?
            .set_default("info_allow_list", vec!["Nome"])?
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let source = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_source(AppConfig::environment().source(Some(source)))
    }

    #[test]
    fn test_defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config.persistence_backend, "sqlite");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.session_cookie, "sunflower_session");
        assert_eq!(config.admin_room, "admin");
        assert_eq!(config.info_allow_list, vec!["Nome".to_string()]);
    }

    #[test]
    fn test_environment_overrides() {
        let config = from_vars(&[
            ("SUNFLOWER_SERVER_PORT", "8080"),
            ("SUNFLOWER_PERSISTENCE_BACKEND", "memory"),
            ("SUNFLOWER_INFO_ALLOW_LIST", "Nome,Raça"),
        ])
        .unwrap();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.persistence_backend, "memory");
        assert_eq!(
            config.info_allow_list,
            vec!["Nome".to_string(), "Raça".to_string()]
        );
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(from_vars(&[("SUNFLOWER_SERVER_PORT", "not-a-port")]).is_err());
    }
}
