//! Cross-module scenarios: configuration, listener registry, events manager
//! and service container wired together the way an application does it.
mod lifecycle_tests;
