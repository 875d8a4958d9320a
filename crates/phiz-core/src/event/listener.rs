use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::event::error::Result;
use crate::event::{Event, Payload};

/// Closure listener signature: `(event, source, data) -> status`
pub type ListenerFn = dyn Fn(&Event<'_>, &dyn Any, &Payload) -> Result<Payload> + Send + Sync;

/// An object listening through methods named after events.
///
/// When an event named `afterQuery` reaches an object listener, the manager
/// asks [`handles("afterQuery")`](EventListener::handles) and, if it does,
/// invokes [`call`](EventListener::call) with that method name. Objects without
/// a matching method are skipped silently, which lets one object sit on a
/// whole group and pick out the events it cares about.
pub trait EventListener: Send + Sync {
    /// Whether this listener has a method named `method`.
    fn handles(&self, method: &str) -> bool;

    /// Invoke the method named `method`.
    fn call(&self, method: &str, event: &Event<'_>, source: &dyn Any, data: &Payload) -> Result<Payload>;
}

/// Handle to a listener. Cloning it clones the handle, not the listener, and
/// two handles are the same handler when they point at the same listener.
#[derive(Clone)]
pub enum Listener {
    Callable(Arc<ListenerFn>),
    Object(Arc<dyn EventListener>),
}

impl Listener {
    pub fn callable<F>(handler: F) -> Self
    where
        F: Fn(&Event<'_>, &dyn Any, &Payload) -> Result<Payload> + Send + Sync + 'static,
    {
        Listener::Callable(Arc::new(handler))
    }

    pub fn object<L: EventListener + 'static>(listener: L) -> Self {
        Listener::Object(Arc::new(listener))
    }

    /// Wrap an object the caller keeps a reference to.
    pub fn from_arc<L: EventListener + 'static>(listener: Arc<L>) -> Self {
        Listener::Object(listener)
    }

    /// Reference equality with `other`.
    pub fn same_handler(&self, other: &Listener) -> bool {
        match (self, other) {
            (Listener::Callable(a), Listener::Callable(b)) => Arc::ptr_eq(a, b),
            (Listener::Object(a), Listener::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Deliver `event`. `None` means an object listener had no method for it.
    pub(crate) fn invoke(&self, event: &Event<'_>) -> Option<Result<Payload>> {
        match self {
            Listener::Callable(handler) => Some(handler(event, event.source(), event.data())),
            Listener::Object(object) => {
                let method = event.event_type();
                if object.handles(method) {
                    Some(object.call(method, event, event.source(), event.data()))
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Callable(_) => f.debug_tuple("Callable").finish_non_exhaustive(),
            Listener::Object(_) => f.debug_tuple("Object").finish_non_exhaustive(),
        }
    }
}

/// A listener together with the priority it was attached with.
#[derive(Clone, Debug)]
pub struct ListenerEntry {
    listener: Listener,
    priority: i32,
}

impl ListenerEntry {
    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }
}

/// Listeners for one key, kept sorted by descending priority.
///
/// Equal priorities keep attachment order, no matter how they interleave
/// with other priorities.
#[derive(Clone, Debug, Default)]
pub struct ListenerQueue {
    entries: Vec<ListenerEntry>,
}

impl ListenerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, listener: Listener, priority: i32) {
        // After every entry of the same or higher priority
        let at = self.entries.partition_point(|entry| entry.priority >= priority);
        self.entries.insert(at, ListenerEntry { listener, priority });
    }

    /// Drop every entry for `listener`, returning how many were removed.
    pub fn remove(&mut self, listener: &Listener) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.listener.same_handler(listener));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in delivery order
    pub fn iter(&self) -> impl Iterator<Item = &ListenerEntry> {
        self.entries.iter()
    }

    /// Handlers only, in delivery order
    pub fn listeners(&self) -> Vec<Listener> {
        self.entries.iter().map(|entry| entry.listener.clone()).collect()
    }
}
