//! Typed view of a model tool call.

use agent_core::tools::{parse_tool_args, ToolCall, ToolError};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const CREATE_TASKS: &str = "create_tasks";
pub const MARK_TASK_COMPLETE: &str = "mark_task_complete";
pub const GENERATE_IMAGE: &str = "generate_image";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTasksArgs {
    #[serde(default)]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkTaskCompleteArgs {
    /// Zero-based position in the task list.
    pub index: i64,
    #[serde(rename = "completionNotes", default)]
    pub completion_notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateImageArgs {
    #[serde(default)]
    pub prompt: String,
}

/// A tool call whose name and arguments have been checked once, at the
/// dispatch boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskToolCall {
    CreateTasks(CreateTasksArgs),
    MarkTaskComplete(MarkTaskCompleteArgs),
    GenerateImage(GenerateImageArgs),
}

impl TaskToolCall {
    pub fn parse(call: &ToolCall) -> Result<Self, ToolError> {
        let name = call.function.name.as_str();
        let raw = call.function.arguments.as_str();
        match name {
            CREATE_TASKS => decode(name, raw).map(Self::CreateTasks),
            MARK_TASK_COMPLETE => decode(name, raw).map(Self::MarkTaskComplete),
            GENERATE_IMAGE => decode(name, raw).map(Self::GenerateImage),
            other => Err(ToolError::NotFound(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateTasks(_) => CREATE_TASKS,
            Self::MarkTaskComplete(_) => MARK_TASK_COMPLETE,
            Self::GenerateImage(_) => GENERATE_IMAGE,
        }
    }
}

fn decode<T: DeserializeOwned>(tool: &str, raw: &str) -> Result<T, ToolError> {
    let value = parse_tool_args(raw)?;
    serde_json::from_value(value)
        .map_err(|e| ToolError::InvalidArguments(format!("{tool}: {e}")))
}
