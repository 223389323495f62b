use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field, reason: reason.into() }
    }

    /// Whether retrying with a corrected file could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            ConfigError::Io(_) => true,
            ConfigError::Yaml(_) | ConfigError::Json(_) => true,
            ConfigError::Invalid { .. } => true,
            ConfigError::UnsupportedFormat { .. } => false,
            ConfigError::UnknownPreset(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
