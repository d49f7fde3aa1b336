//! Error types for razorweb-config

use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML format: {message}")]
    InvalidYaml { message: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    /// Field path for value errors
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }

    /// What the operator can do about it
    pub fn hint(&self) -> &'static str {
        match self {
            ConfigError::FileNotFound { .. } => "Use --config to point at an existing file, or --print-default-config to generate one.",
            ConfigError::Io { .. } => "Check that the file is readable.",
            ConfigError::InvalidYaml { .. } | ConfigError::InvalidValue { .. } => {
                "Compare the file against the output of --print-default-config."
            }
        }
    }
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
