use std::sync::Arc;

use agent_core::tools::{Tool, ToolResult};
use agent_core::{TaskError, TaskStore, TodoItem};
use serde_json::json;

use crate::call::{MarkTaskCompleteArgs, MARK_TASK_COMPLETE};

/// Completes a checklist item, addressed by zero-based index.
pub struct MarkTaskCompleteTool {
    tasks: Arc<TaskStore>,
    actor_label: String,
}

impl MarkTaskCompleteTool {
    pub fn new(tasks: Arc<TaskStore>, actor_label: impl Into<String>) -> Self {
        Self {
            tasks,
            actor_label: actor_label.into(),
        }
    }

    pub async fn run(&self, args: MarkTaskCompleteArgs) -> ToolResult {
        match self.complete(&args).await {
            Ok(item) => ToolResult::success(format!(
                "Marked todo '{}' as complete.\nNotes: {}\nDuration: {}",
                item.description,
                item.completion_notes.as_deref().unwrap_or_default(),
                item.duration_display()
            )),
            Err(e) => ToolResult::failure(format!("Error: {e}")),
        }
    }

    async fn complete(&self, args: &MarkTaskCompleteArgs) -> Result<TodoItem, TaskError> {
        // Checked up front so a rejected call never leaves the item active.
        if args.completion_notes.trim().is_empty() {
            return Err(TaskError::InvalidArgument(
                "Completion notes cannot be empty.".to_string(),
            ));
        }

        let index = args.index.saturating_add(1);
        // A finished item fails here, so repeats report the activation error.
        self.tasks.mark_active(index, &self.actor_label).await?;
        self.tasks.mark_complete(index, &args.completion_notes).await
    }
}

impl Tool for MarkTaskCompleteTool {
    fn name(&self) -> &str {
        MARK_TASK_COMPLETE
    }

    fn description(&self) -> &str {
        "Marks a todo as complete with notes about how it was completed"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "index": {
                    "type": "integer",
                    "description": "Zero-based index of the todo to mark as complete"
                },
                "completionNotes": {
                    "type": "string",
                    "description": "Notes describing how the task was completed"
                }
            },
            "required": ["index", "completionNotes"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(count: usize) -> Arc<TaskStore> {
        let tasks = Arc::new(TaskStore::new());
        let descriptions: Vec<String> = (0..count).map(|n| format!("Task {n}")).collect();
        tasks.create_tasks(&descriptions).await.unwrap();
        tasks
    }

    fn args(index: i64, notes: &str) -> MarkTaskCompleteArgs {
        MarkTaskCompleteArgs {
            index,
            completion_notes: notes.to_string(),
        }
    }

    #[tokio::test]
    async fn completes_zero_based_index() {
        let tasks = seeded(3).await;
        let tool = MarkTaskCompleteTool::new(Arc::clone(&tasks), "AI Agent");

        let result = tool.run(args(1, "Verified: 8 is correct")).await;
        assert!(result.success);
        assert!(result
            .result
            .starts_with("Marked todo 'Task 1' as complete.\nNotes: Verified: 8 is correct\nDuration: "));
        assert!(result.result.ends_with('s'));

        let items = tasks.get_all().await;
        assert!(items[1].is_completed);
        assert_eq!(items[1].tool_used.as_deref(), Some("AI Agent"));
        assert!(items[1].start_time.is_some());
        assert!(!items[0].is_completed);
    }

    #[tokio::test]
    async fn blank_notes_leave_item_untouched() {
        let tasks = seeded(1).await;
        let tool = MarkTaskCompleteTool::new(Arc::clone(&tasks), "AI Agent");

        let result = tool.run(args(0, "")).await;
        assert!(!result.success);
        assert_eq!(result.result, "Error: Completion notes cannot be empty.");

        let items = tasks.get_all().await;
        assert!(!items[0].is_active);
        assert!(!items[0].is_completed);
    }

    #[tokio::test]
    async fn store_errors_become_error_text() {
        let tasks = seeded(2).await;
        let tool = MarkTaskCompleteTool::new(Arc::clone(&tasks), "AI Agent");

        assert_eq!(
            tool.run(args(5, "notes")).await.result,
            "Error: Index 6 is out of range. Only 2 todos exist."
        );
        assert_eq!(
            tool.run(args(-3, "notes")).await.result,
            "Error: Index must be 1 or greater."
        );
    }

    #[tokio::test]
    async fn completing_a_finished_item_reports_the_activation_error() {
        let tasks = seeded(2).await;
        let tool = MarkTaskCompleteTool::new(Arc::clone(&tasks), "AI Agent");

        assert!(tool.run(args(0, "done")).await.success);
        let repeat = tool.run(args(0, "again")).await;

        assert!(!repeat.success);
        assert_eq!(repeat.result, "Error: Cannot mark a completed todo as active.");
        let items = tasks.get_all().await;
        assert_eq!(items[0].completion_notes.as_deref(), Some("done"));
    }
}
