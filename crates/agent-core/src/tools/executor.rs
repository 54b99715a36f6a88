use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::tools::{ToolCall, ToolResult, ToolSchema};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Execution failed: {0}")]
    Execution(String),

    #[error("tool execution cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ToolError>;

/// Executes model tool calls.
///
/// Domain failures are reported inside the returned [`ToolResult`]; `Err`
/// is reserved for calls that could not be dispatched at all, plus
/// cancellation.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, call: &ToolCall, cancel: &CancellationToken) -> Result<ToolResult>;
    fn list_tools(&self) -> Vec<ToolSchema>;
}

/// Parse raw argument text; an empty string is treated as `{}`.
pub fn parse_tool_args(arguments: &str) -> Result<serde_json::Value> {
    let trimmed = arguments.trim();
    if trimmed.is_empty() {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(trimmed).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}
