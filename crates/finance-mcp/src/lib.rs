//! Model Context Protocol (MCP) server support
//!
//! This crate exposes a [`ToolRegistry`](finance_tools::ToolRegistry) to MCP
//! clients over the stdio transport:
//! - line-delimited JSON-RPC 2.0 framing
//! - the `initialize` handshake and `ping`
//! - `tools/list` and `tools/call`
//!
//! # Example
//!
//! ```no_run
//! use finance_mcp::{MCPServer, ServerConfig};
//! use finance_tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(ToolRegistry::new());
//! let server = MCPServer::new(ServerConfig::default(), registry);
//! server.serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod jsonrpc;
pub mod protocol;
pub mod schema;
pub mod server;

// Re-export commonly used types
pub use config::{ServerConfig, ToolFilter, ToolPattern};
pub use error::MCPError;
pub use protocol::{MCPContent, MCPToolDefinition, MCPToolResult};
pub use server::MCPServer;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, MCPError>;
