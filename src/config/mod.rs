//! TOML configuration for logging and the demo binary.

pub mod loader;
pub mod types;

pub use loader::ConfigError;
pub use types::{Config, DemoConfig, LoggingConfig};
