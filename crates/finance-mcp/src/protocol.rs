//! MCP message payloads served by this crate

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol revision this server implements
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Revisions a client may request and still get its own version echoed back
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26", "2025-06-18"];

/// MCP tool definition (for tools/list)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MCPToolDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value, // JSON Schema
}

/// MCP tool result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MCPToolResult {
    pub content: Vec<MCPContent>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "isError")]
    pub is_error: Option<bool>,
}

impl MCPToolResult {
    /// Successful result with a single text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![MCPContent::Text { text: text.into() }],
            is_error: Some(false),
        }
    }

    /// Tool-level failure reported back to the model rather than the transport
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![MCPContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }

    /// Build a result from a tool's JSON output
    ///
    /// Strings are passed through verbatim; anything else is pretty-printed.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Self::text(text),
            other => Self::text(serde_json::to_string_pretty(&other).unwrap_or_default()),
        }
    }
}

/// MCP content block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MCPContent {
    Text { text: String },
}

/// Name and version of either side of the connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

/// `initialize` request parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub protocol_version: String,
    #[serde(default)]
    pub capabilities: Value,
    #[serde(default)]
    pub client_info: Option<Implementation>,
}

/// `initialize` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: MCPServerCapabilities,
    pub server_info: Implementation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// MCP server capabilities
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MCPServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    #[serde(default, rename = "listChanged")]
    pub list_changed: bool,
}

/// `tools/call` request parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Pick the protocol version to answer an `initialize` with
pub fn negotiate_version(requested: &str) -> &'static str {
    SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .copied()
        .find(|v| *v == requested)
        .unwrap_or(PROTOCOL_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_result_serialization() {
        let value = serde_json::to_value(MCPToolResult::text("hello")).unwrap();
        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "hello"}], "isError": false})
        );
    }

    #[test]
    fn test_from_value_passes_strings_through() {
        let result = MCPToolResult::from_value(json!("report"));
        assert_eq!(
            result.content,
            vec![MCPContent::Text {
                text: "report".to_string()
            }]
        );

        let result = MCPToolResult::from_value(json!({"a": 1}));
        let MCPContent::Text { text } = &result.content[0];
        assert!(text.contains("\"a\": 1"));
    }

    #[test]
    fn test_negotiate_version() {
        assert_eq!(negotiate_version("2025-03-26"), "2025-03-26");
        assert_eq!(negotiate_version("1999-01-01"), PROTOCOL_VERSION);
    }
}
