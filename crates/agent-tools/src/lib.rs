//! The three task tools the agent works with, and the executor that routes
//! model tool calls to them.

pub mod call;
mod executor;
pub mod image_marker;
pub mod tools;

pub use call::{TaskToolCall, CREATE_TASKS, GENERATE_IMAGE, MARK_TASK_COMPLETE};
pub use executor::{TaskToolExecutor, ACTOR_LABEL};
pub use image_marker::{extract_image_markers, strip_image_markers};
pub use tools::{CreateTasksTool, GenerateImageTool, MarkTaskCompleteTool};
