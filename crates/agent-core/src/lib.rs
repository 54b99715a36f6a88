pub mod agent;
pub mod chat;
pub mod todo;
pub mod tools;

pub use agent::events::AgentEvent;
pub use agent::transcript::Transcript;
pub use agent::types::{Message, Role};
pub use agent::AgentError;
pub use chat::{ChatError, ChatMessage, ChatRole, ConversationStore};
pub use todo::{TaskError, TaskStore, TodoItem, TodoStatus};
pub use tools::{
    parse_tool_args, FunctionCall, FunctionSchema, Tool, ToolCall, ToolCallAccumulator, ToolError,
    ToolExecutor, ToolRegistry, ToolResult, ToolSchema,
};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
