use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, trace, warn};

use crate::config::EventsConfig;
use crate::event::error::{EventsError, Result};
use crate::event::{DEFAULT_PRIORITY, Event, Listener, ListenerQueue, ListenerRegistry, Payload};

/// Components that fire events through a manager they are handed.
pub trait EventsAware {
    fn events_manager(&self) -> Option<Arc<EventsManager>>;

    fn set_events_manager(&mut self, manager: Arc<EventsManager>);
}

#[derive(Default)]
struct ManagerState {
    // None until the first attach; detach_all(None) only empties the map
    registrations: Option<HashMap<String, ListenerQueue>>,
    priorities_enabled: bool,
    collect_responses: bool,
    responses: Vec<Payload>,
}

/// Priority-ordered, cancelable event dispatcher.
///
/// Every method takes `&self`; a listener holding an `Arc<EventsManager>` can
/// attach, detach or fire from inside a dispatch. Queues are snapshotted
/// before delivery and the internal lock is never held while a listener
/// runs, so such changes only affect later dispatches.
pub struct EventsManager {
    state: Mutex<ManagerState>,
}

impl fmt::Debug for EventsManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        let listener_count: usize = state
            .registrations
            .as_ref()
            .map(|registrations| registrations.values().map(ListenerQueue::len).sum())
            .unwrap_or(0);
        f.debug_struct("EventsManager")
            .field("listeners_count", &listener_count)
            .field("priorities_enabled", &state.priorities_enabled)
            .field("collect_responses", &state.collect_responses)
            .field("responses_count", &state.responses.len())
            .finish()
    }
}

impl EventsManager {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ManagerState::default()),
        }
    }

    /// Build a manager from configuration, resolving handler names through `registry`.
    ///
    /// Settings are applied before any binding, so binding priorities are
    /// honoured when `enable_priorities` is set.
    pub fn from_config(config: &EventsConfig, registry: &ListenerRegistry) -> Result<Self> {
        let manager = Self::new();
        manager.enable_priorities(config.enable_priorities);
        manager.collect_responses(config.collect_responses);
        for binding in &config.listeners {
            manager.attach_named(&binding.event, registry, &binding.handler, binding.priority)?;
        }
        Ok(manager)
    }

    fn state(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Events manager lock was poisoned, recovering state");
            poisoned.into_inner()
        })
    }

    /// Attach `listener` to a group (`"db"`) or an event type (`"db:afterQuery"`).
    ///
    /// While priorities are disabled `priority` is ignored and every listener
    /// gets [`DEFAULT_PRIORITY`], so delivery follows attachment order.
    pub fn attach(&self, event_type: &str, listener: Listener, priority: i32) {
        let mut state = self.state();
        let priority = if state.priorities_enabled { priority } else { DEFAULT_PRIORITY };
        state
            .registrations
            .get_or_insert_with(HashMap::new)
            .entry(event_type.to_string())
            .or_default()
            .insert(listener, priority);
        debug!("Attached listener to '{}' with priority {}", event_type, priority);
    }

    /// Attach the listener registered as `handler`.
    ///
    /// Fails with [`EventsError::InvalidHandler`] when `registry` has no such name.
    pub fn attach_named(
        &self,
        event_type: &str,
        registry: &ListenerRegistry,
        handler: &str,
        priority: Option<i32>,
    ) -> Result<()> {
        let listener = registry.get(handler).ok_or_else(|| EventsError::InvalidHandler {
            event_type: event_type.to_string(),
            handler: handler.to_string(),
        })?;
        self.attach(event_type, listener, priority.unwrap_or(DEFAULT_PRIORITY));
        Ok(())
    }

    /// Remove every entry of `listener` under `event_type`.
    ///
    /// Other entries keep their priority and order. Returns whether anything
    /// was removed.
    pub fn detach(&self, event_type: &str, listener: &Listener) -> bool {
        let mut state = self.state();
        let Some(registrations) = state.registrations.as_mut() else {
            return false;
        };
        let Some(queue) = registrations.get_mut(event_type) else {
            return false;
        };
        let removed = queue.remove(listener);
        if queue.is_empty() {
            registrations.remove(event_type);
        }
        debug!("Detached {} listener(s) from '{}'", removed, event_type);
        removed > 0
    }

    /// Clear registrations.
    ///
    /// `None` clears every queue. `Some(key)` clears the queue stored under
    /// `key` and every queue under `key:*`, so `Some("db")` also drops
    /// `"db:afterQuery"` but leaves `"dbx"` alone.
    pub fn detach_all(&self, event_type: Option<&str>) {
        let mut state = self.state();
        match event_type {
            None => {
                if let Some(registrations) = state.registrations.as_mut() {
                    registrations.clear();
                }
                debug!("Detached all listeners");
            }
            Some(key) => {
                if let Some(registrations) = state.registrations.as_mut() {
                    let prefix = format!("{}:", key);
                    registrations.retain(|registered, _| registered != key && !registered.starts_with(&prefix));
                }
                debug!("Detached all listeners under '{}'", key);
            }
        }
    }

    /// Fire `event_type` (`"group:name"`) from `source`.
    ///
    /// The group queue runs first, then the queue for the full type, both
    /// against the same [`Event`]; a stop in the group queue skips the
    /// second. Returns the status of the last listener that ran, or
    /// [`Payload::Null`] when none did. Errors returned by a listener end the
    /// dispatch and are passed through.
    pub fn fire(&self, event_type: &str, source: &dyn Any, data: Payload, cancelable: bool) -> Result<Payload> {
        let (group, name) = split_event_type(event_type)?;

        let (group_queue, type_queue) = {
            let mut state = self.state();
            let Some(registrations) = state.registrations.as_ref() else {
                trace!("No listeners attached, '{}' not dispatched", event_type);
                return Ok(Payload::Null);
            };
            let queues = (registrations.get(group).cloned(), registrations.get(event_type).cloned());
            if state.collect_responses {
                state.responses.clear();
            }
            queues
        };

        debug!("Firing '{}' (cancelable: {})", event_type, cancelable);
        let event = Event::new(name, source, data, cancelable);
        let mut status = Payload::Null;
        if let Some(queue) = group_queue {
            status = self.fire_queue(&queue, &event)?;
        }
        if let Some(queue) = type_queue.filter(|_| !event.is_stopped()) {
            status = self.fire_queue(&queue, &event)?;
        }
        Ok(status)
    }

    /// Deliver `event` to every listener in `queue`, highest priority first.
    ///
    /// Object listeners without a method named after the event are skipped.
    /// Delivery ends once the event is stopped.
    pub fn fire_queue(&self, queue: &ListenerQueue, event: &Event<'_>) -> Result<Payload> {
        let mut status = Payload::Null;
        for entry in queue.iter() {
            if event.is_stopped() {
                break;
            }
            let Some(outcome) = entry.listener().invoke(event) else {
                trace!("Listener has no method '{}', skipped", event.event_type());
                continue;
            };
            status = outcome?;
            trace!("Listener for '{}' returned {}", event.event_type(), status);

            let mut state = self.state();
            if state.collect_responses {
                state.responses.push(status.clone());
            }
            drop(state);

            if event.is_cancelable() && event.is_stopped() {
                debug!("Event '{}' stopped by a listener", event.event_type());
                break;
            }
        }
        Ok(status)
    }

    /// Whether anything is attached under exactly `event_type`.
    pub fn has_listeners(&self, event_type: &str) -> bool {
        self.state()
            .registrations
            .as_ref()
            .and_then(|registrations| registrations.get(event_type))
            .is_some_and(|queue| !queue.is_empty())
    }

    /// Listeners under `event_type`, in delivery order.
    pub fn listeners(&self, event_type: &str) -> Vec<Listener> {
        self.queue(event_type).map(|queue| queue.listeners()).unwrap_or_default()
    }

    /// A copy of the queue under `event_type`, with priorities.
    pub fn queue(&self, event_type: &str) -> Option<ListenerQueue> {
        self.state()
            .registrations
            .as_ref()
            .and_then(|registrations| registrations.get(event_type).cloned())
    }

    /// Every key with listeners attached, sorted
    pub fn event_types(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .state()
            .registrations
            .as_ref()
            .map(|registrations| registrations.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    pub fn enable_priorities(&self, enable: bool) {
        self.state().priorities_enabled = enable;
    }

    pub fn are_priorities_enabled(&self) -> bool {
        self.state().priorities_enabled
    }

    /// Record the status of every listener run by each `fire`.
    pub fn collect_responses(&self, collect: bool) {
        self.state().collect_responses = collect;
    }

    pub fn is_collecting(&self) -> bool {
        self.state().collect_responses
    }

    /// Statuses recorded during the most recent collecting `fire`.
    pub fn responses(&self) -> Vec<Payload> {
        self.state().responses.clone()
    }
}

impl Default for EventsManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `"group:name"`. Exactly one colon, both halves non-empty.
fn split_event_type(event_type: &str) -> Result<(&str, &str)> {
    match event_type.split_once(':') {
        Some((group, name)) if !group.is_empty() && !name.is_empty() && !name.contains(':') => Ok((group, name)),
        _ => Err(EventsError::InvalidEventType {
            event_type: event_type.to_string(),
        }),
    }
}
