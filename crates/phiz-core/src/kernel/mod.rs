//! # Phiz Core Kernel
//!
//! Crate-wide pieces shared by every subsystem:
//!
//! - **Error Handling**: [`Error`](error::Error) wraps the event, container
//!   and configuration errors, with a matching `Result` alias.
//! - **Core Constants**: names and defaults in the `constants` submodule.
pub mod constants;
pub mod error;

pub use error::{Error, Result};
