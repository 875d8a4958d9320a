use crate::config::{EventsConfig, ListenerBinding};
use crate::event::error::Result;
use crate::event::{DEFAULT_PRIORITY, EventsError, EventsManager, Listener, ListenerRegistry, Payload};

fn returning(value: &'static str) -> Listener {
    Listener::callable(move |_event, _source, _data| Ok(Payload::json(value)))
}

fn binding(event: &str, handler: &str, priority: Option<i32>) -> ListenerBinding {
    ListenerBinding {
        event: event.to_string(),
        handler: handler.to_string(),
        priority,
    }
}

#[test]
fn test_register_and_lookup() -> Result<()> {
    let mut registry = ListenerRegistry::new();
    let audit = returning("audit");
    registry.register("audit", audit.clone())?;
    registry.register("echo", returning("echo"))?;

    assert!(registry.contains("audit"));
    assert!(!registry.contains("missing"));
    assert!(registry.get("audit").expect("registered").same_handler(&audit));
    assert_eq!(registry.name_of(&audit), Some("audit"));
    assert_eq!(registry.name_of(&returning("stranger")), None);
    assert_eq!(registry.names(), vec!["audit", "echo"]);
    Ok(())
}

#[test]
fn test_duplicate_name_is_rejected() {
    let mut registry = ListenerRegistry::new();
    registry.register("audit", returning("a")).expect("first registration");

    match registry.register("audit", returning("b")) {
        Err(EventsError::HandlerAlreadyRegistered { name }) => assert_eq!(name, "audit"),
        other => panic!("Expected HandlerAlreadyRegistered, got {:?}", other),
    }
}

#[test]
fn test_attach_named_unknown_handler() {
    let manager = EventsManager::new();
    let registry = ListenerRegistry::new();

    match manager.attach_named("db:afterQuery", &registry, "ghost", None) {
        Err(EventsError::InvalidHandler { event_type, handler }) => {
            assert_eq!(event_type, "db:afterQuery");
            assert_eq!(handler, "ghost");
        }
        other => panic!("Expected InvalidHandler, got {:?}", other),
    }
    assert!(!manager.has_listeners("db:afterQuery"));
}

#[test]
fn test_from_config_applies_settings_before_bindings() -> Result<()> {
    let mut registry = ListenerRegistry::new();
    registry.register("low", returning("low"))?;
    registry.register("high", returning("high"))?;
    let config = EventsConfig {
        enable_priorities: true,
        collect_responses: true,
        listeners: vec![
            binding("db:afterQuery", "low", Some(10)),
            binding("db:afterQuery", "high", Some(500)),
            binding("db", "low", None),
        ],
    };

    let manager = EventsManager::from_config(&config, &registry)?;

    assert!(manager.are_priorities_enabled());
    assert!(manager.is_collecting());
    let queue = manager.queue("db:afterQuery").expect("bound");
    let priorities: Vec<i32> = queue.iter().map(|entry| entry.priority()).collect();
    assert_eq!(priorities, vec![500, 10]);
    assert_eq!(
        manager.queue("db").expect("bound").iter().next().map(|entry| entry.priority()),
        Some(DEFAULT_PRIORITY)
    );

    let status = manager.fire("db:afterQuery", &(), Payload::Null, true)?;
    assert_eq!(status, Payload::json("low"));
    assert_eq!(
        manager.responses(),
        vec![Payload::json("low"), Payload::json("high"), Payload::json("low")]
    );
    Ok(())
}

#[test]
fn test_from_config_fails_on_unknown_handler() {
    let registry = ListenerRegistry::new();
    let config = EventsConfig {
        listeners: vec![binding("db", "ghost", None)],
        ..EventsConfig::default()
    };

    let result = EventsManager::from_config(&config, &registry);
    assert!(matches!(result, Err(EventsError::InvalidHandler { .. })));
}
