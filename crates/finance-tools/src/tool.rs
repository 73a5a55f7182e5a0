//! The `Tool` seam between a transport and the code behind it

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A named, self-describing operation callable by an MCP client
///
/// Implementations report problems with their *arguments* through
/// [`ToolError::InvalidParameters`](crate::ToolError::InvalidParameters).
/// Domain outcomes such as "ticker not found" are ordinary output.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Run the tool on already-parsed JSON arguments
    ///
    /// # Arguments
    ///
    /// * `params` - Arguments object, expected to match [`input_schema`](Self::input_schema)
    ///
    /// # Returns
    ///
    /// The tool output. Text-producing tools return `Value::String`; the MCP
    /// layer passes strings through verbatim and pretty-prints anything else.
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Registry key; unique within a [`ToolRegistry`](crate::ToolRegistry)
    ///
    /// This is the name clients pass to `tools/call`.
    fn name(&self) -> &str;

    /// Human readable summary shown in `tools/list`
    ///
    /// Clients show this to the model when it decides which tool to call.
    fn description(&self) -> &str;

    /// JSON Schema of the arguments object
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": { "ticker": { "type": "string" } },
    ///     "required": ["ticker"]
    /// });
    /// assert_eq!(schema["required"][0], "ticker");
    /// ```
    fn input_schema(&self) -> Value;
}
