mod create_tasks;
mod generate_image;
mod mark_task_complete;

pub use create_tasks::CreateTasksTool;
pub use generate_image::GenerateImageTool;
pub use mark_task_complete::MarkTaskCompleteTool;
