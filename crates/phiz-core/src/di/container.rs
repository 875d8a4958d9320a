use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, trace};
use serde_json::Value;

use crate::di::error::{ContainerError, Result};
use crate::event::{self, EventsAware, EventsManager, Payload};

/// Fired before a service factory runs
pub const BEFORE_SERVICE_RESOLVE: &str = "di:beforeServiceResolve";
/// Fired once a service instance exists
pub const AFTER_SERVICE_RESOLVE: &str = "di:afterServiceResolve";

/// Builds a service from the container and the caller's parameters.
pub type ServiceFactory = dyn Fn(&ServiceContainer, &Value) -> Result<Payload> + Send + Sync;

/// Event data for `di:*` events.
///
/// `instance` is `Null` for `di:beforeServiceResolve`.
#[derive(Debug, Clone)]
pub struct ServiceResolution {
    pub name: String,
    pub parameters: Value,
    pub instance: Payload,
}

/// Fire `di:beforeServiceResolve` for `name`.
///
/// Returns the listeners' non-null status in place of `instance`, or
/// `instance` itself. Without a manager nothing is fired.
pub fn fire_before_service_resolve(
    events: Option<&EventsManager>,
    container: &dyn Any,
    name: &str,
    parameters: &Value,
    instance: Payload,
) -> event::Result<Payload> {
    let Some(events) = events else {
        return Ok(instance);
    };
    let data = Payload::shared(ServiceResolution {
        name: name.to_string(),
        parameters: parameters.clone(),
        instance: Payload::Null,
    });
    let status = events.fire(BEFORE_SERVICE_RESOLVE, container, data, true)?;
    Ok(if status.is_null() { instance } else { status })
}

/// Fire `di:afterServiceResolve` for `name` with the resolved `instance`.
///
/// Same replacement rule as [`fire_before_service_resolve`].
pub fn fire_after_service_resolve(
    events: Option<&EventsManager>,
    container: &dyn Any,
    name: &str,
    parameters: &Value,
    instance: Payload,
) -> event::Result<Payload> {
    let Some(events) = events else {
        return Ok(instance);
    };
    let data = Payload::shared(ServiceResolution {
        name: name.to_string(),
        parameters: parameters.clone(),
        instance: instance.clone(),
    });
    let status = events.fire(AFTER_SERVICE_RESOLVE, container, data, true)?;
    Ok(if status.is_null() { instance } else { status })
}

struct ServiceDefinition {
    factory: Arc<ServiceFactory>,
    shared: bool,
}

/// Service locator keyed by name.
///
/// Shared services are built once and then served from a cache without
/// firing any event.
#[derive(Default)]
pub struct ServiceContainer {
    services: HashMap<String, ServiceDefinition>,
    shared_instances: Mutex<HashMap<String, Payload>>,
    events_manager: Option<Arc<EventsManager>>,
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("services", &self.service_names())
            .field("has_events_manager", &self.events_manager.is_some())
            .finish_non_exhaustive()
    }
}

impl ServiceContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service built afresh on every [`get`](Self::get).
    pub fn set<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&ServiceContainer, &Value) -> Result<Payload> + Send + Sync + 'static,
    {
        self.define(name.into(), Arc::new(factory), false);
    }

    /// Register a service built once and reused afterwards.
    pub fn set_shared<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&ServiceContainer, &Value) -> Result<Payload> + Send + Sync + 'static,
    {
        self.define(name.into(), Arc::new(factory), true);
    }

    fn define(&mut self, name: String, factory: Arc<ServiceFactory>, shared: bool) {
        self.cache().remove(&name);
        debug!("Defined service '{}' (shared: {})", name, shared);
        self.services.insert(name, ServiceDefinition { factory, shared });
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, Payload>> {
        self.shared_instances.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn has(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Forget the definition and any cached instance.
    pub fn remove(&mut self, name: &str) -> bool {
        self.cache().remove(name);
        self.services.remove(name).is_some()
    }

    /// Registered service names, sorted
    pub fn service_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve `name`.
    ///
    /// A `di:beforeServiceResolve` listener may supply the instance, even for
    /// a name with no definition; otherwise the factory builds it. The
    /// result then passes through `di:afterServiceResolve`.
    ///
    /// A shared service caches the instance as the hooks left it, including
    /// one supplied by `di:beforeServiceResolve` in place of the factory.
    pub fn get(&self, name: &str, parameters: Value) -> Result<Payload> {
        let definition = self.services.get(name);
        if definition.is_some_and(|definition| definition.shared) {
            if let Some(instance) = self.cache().get(name).cloned() {
                trace!("Service '{}' served from the shared cache", name);
                return Ok(instance);
            }
        }

        let events = self.events_manager.as_deref();
        let mut instance = fire_before_service_resolve(events, self, name, &parameters, Payload::Null)?;
        if instance.is_null() {
            let definition = definition.ok_or_else(|| ContainerError::ServiceNotFound { name: name.to_string() })?;
            instance = (definition.factory)(self, &parameters)?;
        }
        let instance = fire_after_service_resolve(events, self, name, &parameters, instance)?;

        if definition.is_some_and(|definition| definition.shared) {
            self.cache().insert(name.to_string(), instance.clone());
        }
        Ok(instance)
    }

    /// Resolve `name` and downcast the instance to `T`.
    pub fn get_as<T: Any + Send + Sync>(&self, name: &str, parameters: Value) -> Result<Arc<T>> {
        self.get(name, parameters)?
            .downcast::<T>()
            .ok_or_else(|| ContainerError::ResolutionFailed {
                name: name.to_string(),
                reason: format!("instance is not a {}", std::any::type_name::<T>()),
            })
    }
}

impl EventsAware for ServiceContainer {
    fn events_manager(&self) -> Option<Arc<EventsManager>> {
        self.events_manager.clone()
    }

    fn set_events_manager(&mut self, manager: Arc<EventsManager>) {
        self.events_manager = Some(manager);
    }
}
