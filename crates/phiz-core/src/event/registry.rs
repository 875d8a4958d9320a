use std::collections::HashMap;

use log::debug;

use crate::event::Listener;
use crate::event::error::{EventsError, Result};

/// Named listeners that configuration can refer to.
///
/// Bindings in an [`EventsConfig`](crate::config::EventsConfig) name their
/// handler; the manager looks the name up here when attaching.
#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    listeners: HashMap<String, Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` under `name`. Names are unique.
    pub fn register(&mut self, name: impl Into<String>, listener: Listener) -> Result<()> {
        let name = name.into();
        if self.listeners.contains_key(&name) {
            return Err(EventsError::HandlerAlreadyRegistered { name });
        }
        debug!("Registered listener '{}'", name);
        self.listeners.insert(name, listener);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Listener> {
        self.listeners.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.listeners.contains_key(name)
    }

    /// Reverse lookup: the name `listener` was registered under.
    pub fn name_of(&self, listener: &Listener) -> Option<&str> {
        self.listeners
            .iter()
            .find(|(_, registered)| registered.same_handler(listener))
            .map(|(name, _)| name.as_str())
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.listeners.keys().cloned().collect();
        names.sort();
        names
    }
}
