use std::any::Any;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tempfile::tempdir;

use crate::config::EventsConfig;
use crate::di::{ServiceContainer, ServiceResolution};
use crate::event::error::Result as EventsResult;
use crate::event::{Event, EventListener, EventsAware, EventsError, EventsManager, Listener, ListenerRegistry, Payload};
use crate::kernel::error::{Error, Result};

/// Profiler plugin: one object sitting on the `db` group
#[derive(Default)]
struct Profiler {
    entries: Mutex<Vec<String>>,
}

impl EventListener for Profiler {
    fn handles(&self, method: &str) -> bool {
        matches!(method, "beforeQuery" | "afterQuery")
    }

    fn call(&self, method: &str, _event: &Event<'_>, _source: &dyn Any, data: &Payload) -> EventsResult<Payload> {
        self.entries.lock().unwrap().push(format!("{} {}", method, data));
        Ok(Payload::Null)
    }
}

/// Firewall refusing queries on the `secrets` table
fn firewall() -> Listener {
    Listener::callable(|event, _source, data| {
        let sql = data.as_json().and_then(Value::as_str).unwrap_or_default();
        if sql.contains("secrets") {
            event.stop()?;
            return Ok(Payload::json("denied"));
        }
        Ok(Payload::Null)
    })
}

struct Connection;

impl Connection {
    /// Run `sql` unless a listener stops `db:beforeQuery`
    fn query(&self, events: &EventsManager, sql: &str) -> Result<bool> {
        let status = events.fire("db:beforeQuery", self, Payload::json(sql), true)?;
        if status == Payload::json("denied") {
            return Ok(false);
        }
        events.fire("db:afterQuery", self, Payload::json(sql), false)?;
        Ok(true)
    }
}

const CONFIG: &str = r#"
enable_priorities = true
collect_responses = true

[[listeners]]
event = "db"
handler = "profiler"
priority = 10

[[listeners]]
event = "db:beforeQuery"
handler = "firewall"
priority = 500
"#;

fn registry_with(profiler: &Arc<Profiler>) -> Result<ListenerRegistry> {
    let mut registry = ListenerRegistry::new();
    registry.register("profiler", Listener::from_arc(Arc::clone(profiler)))?;
    registry.register("firewall", firewall())?;
    Ok(registry)
}

#[test]
fn test_configured_manager_drives_database_events() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("events.toml");
    std::fs::write(&path, CONFIG).expect("Failed to write config");

    let profiler = Arc::new(Profiler::default());
    let config = EventsConfig::load(&path)?;
    let events = EventsManager::from_config(&config, &registry_with(&profiler)?)?;
    let connection = Connection;

    assert!(connection.query(&events, "SELECT * FROM users")?);
    assert!(!connection.query(&events, "SELECT * FROM secrets")?);

    // The group queue runs before the type queue, so the profiler sees the
    // refused query before the firewall stops it.
    assert_eq!(
        *profiler.entries.lock().unwrap(),
        vec![
            r#"beforeQuery "SELECT * FROM users""#,
            r#"afterQuery "SELECT * FROM users""#,
            r#"beforeQuery "SELECT * FROM secrets""#,
        ]
    );
    assert_eq!(events.responses(), vec![Payload::Null, Payload::json("denied")]);
    Ok(())
}

#[test]
fn test_container_resolution_is_observable_through_config() -> Result<()> {
    let resolved = Arc::new(Mutex::new(Vec::new()));
    let recorder = {
        let resolved = Arc::clone(&resolved);
        Listener::callable(move |event, _source, data| {
            if let Some(resolution) = data.downcast_ref::<ServiceResolution>() {
                resolved.lock().unwrap().push(format!("{}:{}", event.event_type(), resolution.name));
            }
            Ok(Payload::Null)
        })
    };
    let mut registry = ListenerRegistry::new();
    registry.register("recorder", recorder)?;
    let config = EventsConfig::parse(
        r#"{"listeners": [{"event": "di", "handler": "recorder"}]}"#,
        crate::config::ConfigFormat::Json,
    )?;
    let events = Arc::new(EventsManager::from_config(&config, &registry)?);

    let mut container = ServiceContainer::new();
    container.set("connection", |_container, _parameters| Ok(Payload::shared(Connection)));
    container.set_events_manager(Arc::clone(&events));

    let connection = container.get_as::<Connection>("connection", Value::Null)?;
    assert!(connection.query(&events, "SELECT 1")?);

    assert_eq!(
        *resolved.lock().unwrap(),
        vec!["beforeServiceResolve:connection", "afterServiceResolve:connection"]
    );
    Ok(())
}

#[test]
fn test_errors_surface_as_kernel_errors() {
    let events = EventsManager::new();
    events.attach("db", firewall(), 100);

    // The firewall stops refused queries, which a non-cancelable event forbids
    let result: Result<Payload> = events
        .fire("db:afterQuery", &Connection, Payload::json("DROP TABLE secrets"), false)
        .map_err(Error::from);

    assert!(matches!(result, Err(Error::Events(EventsError::NonCancelableStop { .. }))));
}
