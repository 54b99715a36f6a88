use std::sync::Arc;

use agent_core::tools::{Tool, ToolResult};
use agent_core::TaskStore;
use serde_json::json;

use crate::call::{CreateTasksArgs, CREATE_TASKS};

/// Adds items to the session checklist.
pub struct CreateTasksTool {
    tasks: Arc<TaskStore>,
}

impl CreateTasksTool {
    pub fn new(tasks: Arc<TaskStore>) -> Self {
        Self { tasks }
    }

    /// Lists only the items this call added.
    pub async fn run(&self, args: CreateTasksArgs) -> ToolResult {
        let added = args
            .descriptions
            .iter()
            .filter(|description| !description.trim().is_empty())
            .count();

        match self.tasks.create_tasks(&args.descriptions).await {
            Ok(items) => {
                let created = &items[items.len().saturating_sub(added)..];
                let lines: Vec<String> = created
                    .iter()
                    .map(|item| format!("- {}", item.description))
                    .collect();
                ToolResult::success(format!(
                    "Created {} todo(s):\n{}",
                    created.len(),
                    lines.join("\n")
                ))
            }
            Err(e) => ToolResult::failure(format!("Error: {e}")),
        }
    }
}

impl Tool for CreateTasksTool {
    fn name(&self) -> &str {
        CREATE_TASKS
    }

    fn description(&self) -> &str {
        "Creates one or more todos based on the provided task descriptions"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "descriptions": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Array of task descriptions to create as todos"
                }
            },
            "required": ["descriptions"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> CreateTasksArgs {
        CreateTasksArgs {
            descriptions: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn summary_lists_only_new_items() {
        let tasks = Arc::new(TaskStore::new());
        let tool = CreateTasksTool::new(Arc::clone(&tasks));

        tool.run(args(&["Earlier"])).await;
        let result = tool
            .run(args(&["Perform addition of 5+3", " ", "Prepare final summary"]))
            .await;

        assert!(result.success);
        assert_eq!(
            result.result,
            "Created 2 todo(s):\n- Perform addition of 5+3\n- Prepare final summary"
        );
        assert_eq!(tasks.len().await, 3);
    }

    #[tokio::test]
    async fn empty_descriptions_become_error_text() {
        let tool = CreateTasksTool::new(Arc::new(TaskStore::new()));
        let result = tool.run(args(&[])).await;

        assert!(!result.success);
        assert_eq!(result.result, "Error: Descriptions cannot be empty.");
    }

    #[test]
    fn schema_requires_descriptions() {
        let schema = CreateTasksTool::new(Arc::new(TaskStore::new())).to_schema();
        assert_eq!(schema.function.name, "create_tasks");
        assert_eq!(schema.function.parameters["required"][0], "descriptions");
    }
}
