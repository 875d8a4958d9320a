// Event system test module
#[cfg(test)]
mod error_tests;
#[cfg(test)]
mod registry_tests;

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::event::{DEFAULT_PRIORITY, EventsManager, Listener, Payload};

    #[test]
    fn test_event_dispatch() {
        let manager = EventsManager::new();
        let called = Arc::new(AtomicU32::new(0));
        let called_clone = Arc::clone(&called);

        manager.attach(
            "test:event",
            Listener::callable(move |_event, _source, _data| {
                called_clone.fetch_add(1, Ordering::SeqCst);
                Ok(Payload::Null)
            }),
            DEFAULT_PRIORITY,
        );
        manager
            .fire("test:event", &(), Payload::Null, true)
            .expect("dispatch should succeed");

        assert_eq!(called.load(Ordering::SeqCst), 1, "Handler should have been called");
    }
}
