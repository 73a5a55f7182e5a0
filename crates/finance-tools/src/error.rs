//! Error types for tool execution

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type for tool lookup and execution
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool registered under the requested name
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Arguments did not match the tool's input schema
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The tool ran but could not produce a result
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::InvalidParameters(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ToolError::NotFound("get_nothing".to_string());
        assert_eq!(err.to_string(), "Unknown tool: get_nothing");

        let err = ToolError::InvalidParameters("missing field `ticker`".to_string());
        assert_eq!(err.to_string(), "Invalid parameters: missing field `ticker`");
    }
}
