use std::any::Any;
use std::cell::Cell;
use std::fmt;

use crate::event::Payload;
use crate::event::error::{EventsError, Result};

/// A single occurrence being delivered to listeners.
///
/// Everything but the stopped flag is fixed at construction. The source is
/// borrowed from the caller of [`EventsManager::fire`](crate::event::EventsManager::fire)
/// and only lives as long as the dispatch.
pub struct Event<'a> {
    event_type: String,
    source: &'a dyn Any,
    data: Payload,
    cancelable: bool,
    stopped: Cell<bool>,
}

impl<'a> Event<'a> {
    pub fn new(event_type: impl Into<String>, source: &'a dyn Any, data: Payload, cancelable: bool) -> Self {
        Self {
            event_type: event_type.into(),
            source,
            data,
            cancelable,
            stopped: Cell::new(false),
        }
    }

    /// Event name without the group prefix, e.g. `afterQuery`
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn source(&self) -> &'a dyn Any {
        self.source
    }

    /// The source as a concrete type, if it is one.
    pub fn source_as<T: Any>(&self) -> Option<&'a T> {
        self.source.downcast_ref::<T>()
    }

    pub fn data(&self) -> &Payload {
        &self.data
    }

    pub fn is_cancelable(&self) -> bool {
        self.cancelable
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Stop delivery to the remaining listeners.
    ///
    /// Fails with [`EventsError::NonCancelableStop`] when the event was fired
    /// as non-cancelable; the flag is left untouched in that case.
    pub fn stop(&self) -> Result<()> {
        if !self.cancelable {
            return Err(EventsError::NonCancelableStop {
                event_type: self.event_type.clone(),
            });
        }
        self.stopped.set(true);
        Ok(())
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("data", &self.data)
            .field("cancelable", &self.cancelable)
            .field("stopped", &self.stopped.get())
            .finish_non_exhaustive()
    }
}
