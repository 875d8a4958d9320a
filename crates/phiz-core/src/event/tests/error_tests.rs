#![cfg(test)]

use crate::event::error::EventsError;

#[test]
fn test_events_error_display() {
    let err_handler = EventsError::InvalidHandler {
        event_type: "db:afterQuery".to_string(),
        handler: "audit".to_string(),
    };
    assert_eq!(
        format!("{}", err_handler),
        "Invalid handler 'audit' for event 'db:afterQuery': no listener is registered under that name"
    );

    let err_type = EventsError::InvalidEventType {
        event_type: "noColonHere".to_string(),
    };
    assert_eq!(
        format!("{}", err_type),
        "Invalid event type 'noColonHere': expected the form 'group:name'"
    );

    let err_stop = EventsError::NonCancelableStop {
        event_type: "afterQuery".to_string(),
    };
    assert_eq!(
        format!("{}", err_stop),
        "Event 'afterQuery' is not cancelable and cannot be stopped"
    );

    let err_dup = EventsError::HandlerAlreadyRegistered {
        name: "audit".to_string(),
    };
    assert_eq!(format!("{}", err_dup), "A listener named 'audit' is already registered");
}

#[test]
fn test_events_error_converts_into_kernel_error() {
    let err: crate::kernel::Error = EventsError::InvalidEventType {
        event_type: "x".to_string(),
    }
    .into();
    assert!(matches!(err, crate::kernel::Error::Events(EventsError::InvalidEventType { .. })));
    assert_eq!(
        err.to_string(),
        "Event system error: Invalid event type 'x': expected the form 'group:name'"
    );
}
