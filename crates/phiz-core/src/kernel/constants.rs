/// Application name
pub const APP_NAME: &str = "phiz";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Events config read by the CLI when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "events.toml";
