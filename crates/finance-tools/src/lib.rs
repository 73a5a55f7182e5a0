//! Tool management and execution framework
//!
//! This crate provides the seam between a tool-invocation transport (the MCP
//! server) and the functions that actually do the work.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::Tool;
