use crate::tools::ToolResult;
use serde::{Deserialize, Serialize};

/// Progress notifications emitted while a prompt is being processed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    Token {
        content: String,
    },

    ToolStart {
        tool_call_id: String,
        tool_name: String,
        arguments: serde_json::Value,
    },

    ToolComplete {
        tool_call_id: String,
        tool_name: String,
        result: ToolResult,
    },

    /// Emitted once per executed tool call, after its result has been
    /// recorded. Observers use it to refresh task views.
    ToolProgress {
        tool_name: String,
    },

    Complete {
        rounds: usize,
        tool_calls: usize,
    },

    Error {
        message: String,
    },
}
