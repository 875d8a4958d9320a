//! # Phiz Core Service Container Errors
use thiserror::Error;

use crate::event::EventsError;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Service '{name}' wasn't found in the service container")]
    ServiceNotFound { name: String },

    #[error("Service '{name}' could not be resolved: {reason}")]
    ResolutionFailed { name: String, reason: String },

    #[error("Event system error: {0}")]
    Events(#[from] EventsError),
}

/// Shorthand for Result with [`ContainerError`]
pub type Result<T> = std::result::Result<T, ContainerError>;
