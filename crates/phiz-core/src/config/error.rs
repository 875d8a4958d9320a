//! # Phiz Core Configuration Errors
//!
//! Defines [`ConfigError`], covering failures to read, recognise or
//! (de)serialize an events configuration file.
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization to '{format}' failed: {source}")]
    Serialization {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Deserialization from '{format}' failed: {source}")]
    Deserialization {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

// Helper for creating Io errors, ensuring path is always included.
impl ConfigError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        ConfigError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }

    pub(crate) fn serialization(format: ConfigFormat, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        ConfigError::Serialization {
            format: format.extension().to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn deserialization(format: ConfigFormat, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        ConfigError::Deserialization {
            format: format.extension().to_string(),
            source: Box::new(source),
        }
    }
}

/// Shorthand for Result with [`ConfigError`]
pub type Result<T> = std::result::Result<T, ConfigError>;
