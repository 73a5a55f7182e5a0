//! MCP server configuration

use crate::error::MCPError;
use serde::{Deserialize, Serialize};

/// Server identity and tool exposure settings
///
/// # Example
///
/// ```json
/// {
///   "name": "finance-mcp",
///   "version": "0.1.0",
///   "instructions": "Stock market KPIs by ticker symbol",
///   "tools": { "allow": "*", "deny": ["get_analyst_data"] }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Name reported in the `initialize` response
    #[serde(default = "default_name")]
    pub name: String,

    /// Version reported in the `initialize` response
    #[serde(default = "default_version")]
    pub version: String,

    /// Free-form usage hints for the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Which registered tools are exposed
    #[serde(default)]
    pub tools: ToolFilter,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            instructions: None,
            tools: ToolFilter::default(),
        }
    }
}

/// Tool filtering configuration
///
/// Supports allow-listing and deny-listing of tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolFilter {
    /// Allowed tools ("*" for all, or list of tool names)
    #[serde(default = "default_allow_all")]
    pub allow: ToolPattern,

    /// Denied tools (overrides allow list)
    #[serde(default)]
    pub deny: Vec<String>,
}

impl Default for ToolFilter {
    fn default() -> Self {
        Self {
            allow: default_allow_all(),
            deny: Vec::new(),
        }
    }
}

/// Tool name pattern: `"*"` or an explicit list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolPattern {
    /// Allow all tools
    All(String), // Must be "*"

    /// Allow specific tools by name
    List(Vec<String>),
}

fn default_name() -> String {
    "finance-mcp".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_allow_all() -> ToolPattern {
    ToolPattern::All("*".to_string())
}

impl ServerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, MCPError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| MCPError::ConfigError(format!("Failed to read config file: {e}")))?;

        serde_json::from_str(&content)
            .map_err(|e| MCPError::ConfigError(format!("Failed to parse config file: {e}")))
    }

    /// Set the server name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl ToolFilter {
    /// Check if a tool should be exposed
    ///
    /// Deny list takes precedence over allow list.
    pub fn allows(&self, tool_name: &str) -> bool {
        if self.deny.iter().any(|d| d == tool_name) {
            return false;
        }

        match &self.allow {
            ToolPattern::All(pattern) => pattern == "*",
            ToolPattern::List(allowed) => allowed.iter().any(|a| a == tool_name),
        }
    }
}
