//! Stdio transport MCP server
//!
//! Reads one JSON-RPC message per line and writes one response per line.
//! Requests are handled strictly in arrival order.

use std::sync::Arc;

use finance_tools::ToolRegistry;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::Result;
use crate::config::ServerConfig;
use crate::error::MCPError;
use crate::jsonrpc::{JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse};
use crate::protocol::{
    CallToolParams, Implementation, InitializeParams, InitializeResult, MCPServerCapabilities,
    MCPToolDefinition, MCPToolResult, PROTOCOL_VERSION, ToolsCapability, negotiate_version,
};
use crate::schema::validate_arguments;

/// MCP server exposing a tool registry
pub struct MCPServer {
    config: ServerConfig,
    registry: Arc<ToolRegistry>,
}

impl MCPServer {
    /// Create a new server
    ///
    /// # Arguments
    ///
    /// * `config` - Server identity and tool filter
    /// * `registry` - Tools to expose
    pub fn new(config: ServerConfig, registry: Arc<ToolRegistry>) -> Self {
        Self { config, registry }
    }

    /// Definitions of every tool the filter lets through, in registry order
    pub fn tool_definitions(&self) -> Vec<MCPToolDefinition> {
        self.registry
            .list_tools()
            .iter()
            .filter(|tool| self.config.tools.allows(tool.name()))
            .map(|tool| MCPToolDefinition {
                name: tool.name().to_string(),
                description: Some(tool.description().to_string()),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Serve on the process's stdin/stdout until stdin closes
    pub async fn serve_stdio(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve over an arbitrary line-oriented transport until EOF
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            server = %self.config.name,
            version = %self.config.version,
            tools = self.registry.len(),
            "MCP server listening on stdio"
        );

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(line).await {
                let payload = serde_json::to_string(&response)?;
                writer.write_all(payload.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("stdin closed, shutting down MCP server");
        Ok(())
    }

    /// Handle one raw message line
    ///
    /// Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("unparsable message: {e}");
                let err = MCPError::ParseError(e.to_string());
                return Some(JsonRpcResponse::failure(Value::Null, &err));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                let err = MCPError::InvalidRequest(e.to_string());
                Some(JsonRpcResponse::failure(id, &err))
            }
        }
    }

    /// Handle a decoded request or notification
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            let err = MCPError::InvalidRequest(format!(
                "unsupported jsonrpc version '{}'",
                request.jsonrpc
            ));
            return Some(JsonRpcResponse::failure(
                request.id.unwrap_or(Value::Null),
                &err,
            ));
        }

        if request.is_notification() {
            debug!(method = %request.method, "notification received");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        debug!(method = %request.method, "request received");

        match self.dispatch(&request.method, request.params).await {
            Ok(result) => Some(JsonRpcResponse::success(id, result)),
            Err(e) => {
                warn!(method = %request.method, "request failed: {e}");
                Some(JsonRpcResponse::failure(id, &e))
            }
        }
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value> {
        match method {
            "initialize" => self.initialize(params),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.tool_definitions() })),
            "tools/call" => {
                let params = params
                    .ok_or_else(|| MCPError::InvalidParams("tools/call requires params".into()))?;
                let params: CallToolParams = serde_json::from_value(params)
                    .map_err(|e| MCPError::InvalidParams(e.to_string()))?;
                let result = self.call_tool(params).await?;
                Ok(serde_json::to_value(result)?)
            }
            other => Err(MCPError::MethodNotFound(other.to_string())),
        }
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value> {
        let protocol_version = match params {
            Some(params) => {
                let params: InitializeParams = serde_json::from_value(params)
                    .map_err(|e| MCPError::InvalidParams(e.to_string()))?;
                if let Some(client) = &params.client_info {
                    info!("client connected: {} v{}", client.name, client.version);
                }
                negotiate_version(&params.protocol_version)
            }
            None => PROTOCOL_VERSION,
        };

        let result = InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: MCPServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: Implementation {
                name: self.config.name.clone(),
                version: self.config.version.clone(),
            },
            instructions: self.config.instructions.clone(),
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Run a tool call, turning tool failures into `isError` results
    pub async fn call_tool(&self, params: CallToolParams) -> Result<MCPToolResult> {
        if !self.config.tools.allows(&params.name) {
            return Err(MCPError::InvalidParams(format!(
                "Unknown tool: {}",
                params.name
            )));
        }
        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| MCPError::InvalidParams(format!("Unknown tool: {}", params.name)))?;

        let arguments = params.arguments.unwrap_or_else(|| json!({}));
        if let Err(reason) = validate_arguments(&arguments, &tool.input_schema()) {
            warn!(tool = %params.name, "rejected arguments: {reason}");
            return Ok(MCPToolResult::error(format!(
                "Invalid arguments for {}: {reason}",
                params.name
            )));
        }

        match tool.execute(arguments).await {
            Ok(output) => Ok(MCPToolResult::from_value(output)),
            Err(e) => {
                error!(tool = %params.name, "tool execution failed: {e}");
                Ok(MCPToolResult::error(e.to_string()))
            }
        }
    }
}
