//! Error types for MCP operations

use thiserror::Error;

/// JSON-RPC error codes used by the server
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Errors that can occur during MCP operations
#[derive(Error, Debug)]
pub enum MCPError {
    /// Incoming line was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON was valid but not a JSON-RPC request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Method is not implemented by this server
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Request parameters were missing or malformed
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MCPError {
    /// JSON-RPC error code for this error
    pub fn code(&self) -> i64 {
        match self {
            MCPError::ParseError(_) => codes::PARSE_ERROR,
            MCPError::InvalidRequest(_) => codes::INVALID_REQUEST,
            MCPError::MethodNotFound(_) => codes::METHOD_NOT_FOUND,
            MCPError::InvalidParams(_) => codes::INVALID_PARAMS,
            MCPError::ConfigError(_)
            | MCPError::InternalError(_)
            | MCPError::JsonError(_)
            | MCPError::IoError(_) => codes::INTERNAL_ERROR,
        }
    }
}

impl From<finance_tools::ToolError> for MCPError {
    fn from(err: finance_tools::ToolError) -> Self {
        match err {
            finance_tools::ToolError::NotFound(name) => {
                MCPError::InvalidParams(format!("Unknown tool: {name}"))
            }
            other => MCPError::InternalError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(MCPError::ParseError("x".into()).code(), -32700);
        assert_eq!(MCPError::MethodNotFound("x".into()).code(), -32601);
        assert_eq!(MCPError::InvalidParams("x".into()).code(), -32602);
        assert_eq!(MCPError::InternalError("x".into()).code(), -32603);
    }

    #[test]
    fn test_serialization_failure_is_internal() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(MCPError::from(json_err).code(), codes::INTERNAL_ERROR);
    }

    #[test]
    fn test_unknown_tool_maps_to_invalid_params() {
        let err: MCPError = finance_tools::ToolError::NotFound("nope".into()).into();
        assert_eq!(err.code(), codes::INVALID_PARAMS);
        assert!(err.to_string().contains("Unknown tool: nope"));
    }
}
