//! # Phiz Core Event System
//!
//! The [`EventsManager`] keeps one ordered listener queue per key and
//! delivers fired events to them, highest priority first.
//!
//! Keys are either a bare group (`"db"`) or a fully qualified event type
//! (`"db:afterQuery"`). Firing `"db:afterQuery"` runs the `"db"` queue and then
//! the `"db:afterQuery"` queue against the same [`Event`]. A listener may stop a
//! cancelable event, which ends delivery for that event.
//!
//! Listeners come in two shapes, see [`Listener`]: plain closures, and objects
//! implementing [`EventListener`] that expose methods named after events.
pub mod error;
pub mod listener;
pub mod manager;
pub mod payload;
pub mod registry;
pub mod types;

/// Priority of listeners attached while priorities are disabled.
pub const DEFAULT_PRIORITY: i32 = 100;

pub use error::{EventsError, Result};
pub use listener::{EventListener, Listener, ListenerEntry, ListenerFn, ListenerQueue};
pub use manager::{EventsAware, EventsManager};
pub use payload::Payload;
pub use registry::ListenerRegistry;
pub use types::Event;

// Test module declaration
#[cfg(test)]
mod tests;
