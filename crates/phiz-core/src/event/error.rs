//! # Phiz Core Event System Errors
//!
//! Defines [`EventsError`], raised on malformed calls into the event system:
//! unknown handler names, event types lacking the `group:name` shape, and
//! stopping an event that was fired as non-cancelable.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventsError {
    #[error("Invalid handler '{handler}' for event '{event_type}': no listener is registered under that name")]
    InvalidHandler {
        event_type: String,
        handler: String,
    },

    #[error("Invalid event type '{event_type}': expected the form 'group:name'")]
    InvalidEventType {
        event_type: String,
    },

    #[error("Event '{event_type}' is not cancelable and cannot be stopped")]
    NonCancelableStop {
        event_type: String,
    },

    #[error("A listener named '{name}' is already registered")]
    HandlerAlreadyRegistered {
        name: String,
    },
}

/// Shorthand for Result with [`EventsError`]
pub type Result<T> = std::result::Result<T, EventsError>;
