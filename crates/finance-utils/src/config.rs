//! Configuration management utilities

use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

/// Process-level configuration shared by the workspace binaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name; logged at startup and announced as the MCP server
    /// name unless a server config file names it
    pub app_name: String,
    /// Log line format
    pub log_format: LogFormat,
    /// Filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "finance-mcp".to_string(),
            log_format: LogFormat::Text,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Read overrides from `FINANCE_APP_NAME`, `FINANCE_LOG_FORMAT` and
    /// `FINANCE_LOG_FILTER`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(name) = std::env::var("FINANCE_APP_NAME") {
            if !name.trim().is_empty() {
                config.app_name = name;
            }
        }
        if let Some(format) = std::env::var("FINANCE_LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.log_format = format;
        }
        if let Ok(filter) = std::env::var("FINANCE_LOG_FILTER") {
            config.log_filter = filter;
        }
        config
    }

    /// Install the tracing subscriber described by this config
    pub fn init_tracing(&self) {
        crate::logging::init_tracing_with(self.log_format, &self.log_filter);
    }
}
