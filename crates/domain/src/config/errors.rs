use crate::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Invalid TOML in config: {0}")]
    Parse(String),

    #[error("Invalid lookup configuration: {0}")]
    Validation(String),
}

impl From<ConfigError> for DomainError {
    fn from(error: ConfigError) -> Self {
        DomainError::ConfigError(error.to_string())
    }
}
