use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Dynamic value carried as event data and returned by listeners.
///
/// `Null` stands for "no value": an event fired without data, or a listener
/// with nothing to report. Object references travel as [`Payload::Shared`] and
/// compare by identity, everything else compares by value.
#[derive(Clone, Default)]
pub enum Payload {
    #[default]
    Null,
    /// Plain data
    Json(Value),
    /// Shared object reference, e.g. a resolved service instance
    Shared(Arc<dyn Any + Send + Sync>),
}

impl Payload {
    /// Wrap anything convertible into a JSON value. `null` becomes [`Payload::Null`].
    pub fn json(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Null => Payload::Null,
            value => Payload::Json(value),
        }
    }

    /// Move `value` behind a new shared reference.
    pub fn shared<T: Any + Send + Sync>(value: T) -> Self {
        Payload::Shared(Arc::new(value))
    }

    /// Share an existing reference without copying the object.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Payload::Shared(value)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Payload::Null | Payload::Json(Value::Null))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the shared object as `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Payload::Shared(object) => object.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Clone the shared reference as `Arc<T>`, if the object is a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Payload::Shared(object) => Arc::clone(object).downcast::<T>().ok(),
            _ => None,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::json(value)
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::Shared(a), Payload::Shared(b)) => Arc::ptr_eq(a, b),
            (Payload::Shared(_), _) | (_, Payload::Shared(_)) => false,
            (a, b) if a.is_null() || b.is_null() => a.is_null() && b.is_null(),
            (Payload::Json(a), Payload::Json(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Null => f.write_str("Null"),
            Payload::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Payload::Shared(_) => f.debug_tuple("Shared").finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Null => f.write_str("null"),
            Payload::Json(value) => write!(f, "{}", value),
            Payload::Shared(_) => f.write_str("<shared object>"),
        }
    }
}
