use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `MVIKIT_LOG` is unset (default: "info").
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Append logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Colored output; ignored when logging to a file (default: true).
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

/// Settings of the bundled demo binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Counter increments to run (default: 3).
    #[serde(default = "default_steps")]
    pub steps: u32,
    /// Page size of the pager demo (default: 10).
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            file: None,
            ansi: default_ansi(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            items_per_page: default_items_per_page(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_ansi() -> bool {
    true
}

fn default_steps() -> u32 {
    3
}

fn default_items_per_page() -> usize {
    10
}
