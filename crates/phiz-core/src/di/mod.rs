//! # Phiz Core Service Container
//!
//! A small service locator that announces every resolution through the
//! events manager. Listeners on the `di` group can observe, wrap or replace
//! services:
//!
//! - `di:beforeServiceResolve` fires before the factory runs; a non-null
//!   status is used as the instance and the factory is skipped.
//! - `di:afterServiceResolve` fires with the resolved instance; a non-null
//!   status replaces it.
//!
//! Both events carry a [`ServiceResolution`] as shared data and the container
//! as source.
pub mod container;
pub mod error;

pub use container::{
    AFTER_SERVICE_RESOLVE, BEFORE_SERVICE_RESOLVE, ServiceContainer, ServiceFactory, ServiceResolution,
    fire_after_service_resolve, fire_before_service_resolve,
};
pub use error::{ContainerError, Result};
