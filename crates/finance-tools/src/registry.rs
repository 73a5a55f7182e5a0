//! Tool registry for managing available tools

use crate::{Result, Tool, ToolError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry for managing tools
///
/// Built once at startup and then shared read-only. Tools are listed in the
/// order they were registered.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    ///
    /// A tool registered under an existing name replaces the earlier one in
    /// place, keeping its listing position.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if let Some(&slot) = self.index.get(&name) {
            tracing::debug!(tool = %name, "replacing registered tool");
            self.tools[slot] = tool;
        } else {
            self.index.insert(name, self.tools.len());
            self.tools.push(tool);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&slot| Arc::clone(&self.tools[slot]))
    }

    /// Look up a tool and execute it
    pub async fn call(&self, name: &str, params: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(params).await
    }

    /// List all registered tools in registration order
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.clone()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
