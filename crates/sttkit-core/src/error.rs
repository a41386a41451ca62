use crate::types::EngineState;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

/// Failures of the engine contract. Always returned, never panicked; an
/// unavailable engine kind is not an error but an absent factory result.
#[derive(Debug, Error)]
pub enum SttError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("'{op}' called in state '{state}'")]
    InvalidState { op: &'static str, state: EngineState },

    #[error("model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("audio processing failed: {0}")]
    Processing(String),
}
