//! Global configuration rows

/// Key of the row holding the current environment (combat / idle)
pub const ENVIRONMENT_KEY: &str = "environment";

/// A single keyed configuration value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub key: String,
    pub value: String,
}

impl EnvironmentConfig {
    pub fn environment(value: impl Into<String>) -> Self {
        Self {
            key: ENVIRONMENT_KEY.to_string(),
            value: value.into(),
        }
    }
}
