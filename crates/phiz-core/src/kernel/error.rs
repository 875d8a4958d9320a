//! # Phiz Core Kernel Errors
//!
//! [`Error`] is the umbrella over the subsystem errors, so callers that mix
//! configuration, dispatch and service resolution can use a single `?`.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::error::ConfigError;
use crate::di::error::ContainerError;
use crate::event::error::EventsError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Event system error: {0}")]
    Events(#[from] EventsError),

    #[error("Service container error: {0}")]
    Container(#[from] ContainerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
