pub mod config;
pub mod di;
pub mod event;
pub mod kernel;

// Re-export key public types/traits for easier use by the binary and applications
pub use config::{ConfigFormat, EventsConfig, ListenerBinding};
pub use di::ServiceContainer;
pub use event::{DEFAULT_PRIORITY, Event, EventListener, EventsAware, EventsManager, Listener, ListenerRegistry, Payload};
pub use kernel::error::{Error, Result};

#[cfg(test)]
mod tests;
