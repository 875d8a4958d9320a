use std::any::Any;

use log::info;
use phiz_core::event::error::Result as EventsResult;
use phiz_core::{Event, EventListener, Listener, ListenerRegistry, Payload};

/// Source of every event fired from the command line.
#[derive(Debug)]
pub struct CliSource;

/// Object listener answering the `db` query events.
#[derive(Debug)]
pub struct QueryAudit;

impl EventListener for QueryAudit {
    fn handles(&self, method: &str) -> bool {
        matches!(method, "beforeQuery" | "afterQuery")
    }

    fn call(&self, method: &str, _event: &Event<'_>, _source: &dyn Any, data: &Payload) -> EventsResult<Payload> {
        info!("[audit] {} {}", method, data);
        Ok(Payload::json(format!("audited {}", method)))
    }
}

/// Listeners that configuration files can bind by name.
pub fn builtin_registry() -> EventsResult<ListenerRegistry> {
    let mut registry = ListenerRegistry::new();
    registry.register(
        "log",
        Listener::callable(|event, _source, data| {
            info!("[log] {} {}", event.event_type(), data);
            Ok(Payload::Null)
        }),
    )?;
    registry.register("echo", Listener::callable(|_event, _source, data| Ok(data.clone())))?;
    registry.register(
        "name",
        Listener::callable(|event, _source, _data| Ok(Payload::json(event.event_type()))),
    )?;
    registry.register(
        "stop",
        Listener::callable(|event, _source, _data| {
            event.stop()?;
            Ok(Payload::json("stopped"))
        }),
    )?;
    registry.register("audit", Listener::object(QueryAudit))?;
    Ok(registry)
}
