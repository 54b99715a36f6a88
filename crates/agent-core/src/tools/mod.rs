pub mod accumulator;
pub mod executor;
pub mod registry;
pub mod types;

pub use accumulator::ToolCallAccumulator;
pub use executor::{parse_tool_args, ToolError, ToolExecutor};
pub use registry::{RegistryError, SharedTool, Tool, ToolRegistry};
pub use types::{FunctionCall, FunctionSchema, ToolCall, ToolResult, ToolSchema};
