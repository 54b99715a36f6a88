use std::sync::Arc;

use agent_core::tools::{
    SharedTool, ToolCall, ToolError, ToolExecutor, ToolRegistry, ToolResult, ToolSchema,
};
use agent_core::TaskStore;
use agent_llm::ImageGenerator;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::call::TaskToolCall;
use crate::tools::{CreateTasksTool, GenerateImageTool, MarkTaskCompleteTool};

/// Actor recorded on items the agent activates.
pub const ACTOR_LABEL: &str = "AI Agent";

/// Routes model tool calls to the task tools of one session.
pub struct TaskToolExecutor {
    create_tasks: Arc<CreateTasksTool>,
    mark_task_complete: Arc<MarkTaskCompleteTool>,
    generate_image: Arc<GenerateImageTool>,
    registry: ToolRegistry,
}

impl TaskToolExecutor {
    pub fn new(tasks: Arc<TaskStore>, images: Arc<dyn ImageGenerator>) -> Self {
        let create_tasks = Arc::new(CreateTasksTool::new(Arc::clone(&tasks)));
        let mark_task_complete = Arc::new(MarkTaskCompleteTool::new(tasks, ACTOR_LABEL));
        let generate_image = Arc::new(GenerateImageTool::new(images));

        let registry = ToolRegistry::new();
        let shared: [SharedTool; 3] = [
            create_tasks.clone(),
            mark_task_complete.clone(),
            generate_image.clone(),
        ];
        for tool in shared {
            if let Err(e) = registry.register_shared(tool) {
                log::error!("Failed to register task tool: {}", e);
            }
        }

        Self {
            create_tasks,
            mark_task_complete,
            generate_image,
            registry,
        }
    }
}

#[async_trait]
impl ToolExecutor for TaskToolExecutor {
    async fn execute(
        &self,
        call: &ToolCall,
        cancel: &CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        if cancel.is_cancelled() {
            return Err(ToolError::Cancelled);
        }

        let parsed = TaskToolCall::parse(call)?;
        log::debug!("Dispatching {} ({})", parsed.name(), call.id);

        match parsed {
            TaskToolCall::CreateTasks(args) => Ok(self.create_tasks.run(args).await),
            TaskToolCall::MarkTaskComplete(args) => Ok(self.mark_task_complete.run(args).await),
            TaskToolCall::GenerateImage(args) => self.generate_image.run(args, cancel).await,
        }
    }

    fn list_tools(&self) -> Vec<ToolSchema> {
        self.registry.list_tools()
    }
}

#[cfg(test)]
mod tests {
    use agent_core::tools::FunctionCall;
    use agent_llm::ImageError;

    use super::*;

    struct NoImages;

    #[async_trait]
    impl ImageGenerator for NoImages {
        async fn generate_image(
            &self,
            _prompt: &str,
            _cancel: &CancellationToken,
        ) -> Result<String, ImageError> {
            Err(ImageError::Provider("image backend offline".to_string()))
        }
    }

    fn executor() -> (Arc<TaskStore>, TaskToolExecutor) {
        let tasks = Arc::new(TaskStore::new());
        let executor = TaskToolExecutor::new(Arc::clone(&tasks), Arc::new(NoImages));
        (tasks, executor)
    }

    fn call(name: &str, arguments: &str) -> ToolCall {
        ToolCall {
            id: "call_1".to_string(),
            tool_type: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }
    }

    #[test]
    fn advertises_exactly_three_tools() {
        let (_, executor) = executor();
        let names: Vec<String> = executor
            .list_tools()
            .into_iter()
            .map(|schema| schema.function.name)
            .collect();
        assert_eq!(
            names,
            vec!["create_tasks", "generate_image", "mark_task_complete"]
        );
    }

    #[tokio::test]
    async fn routes_calls_to_the_store() {
        let (tasks, executor) = executor();
        let token = CancellationToken::new();

        executor
            .execute(
                &call("create_tasks", r#"{"descriptions":["Add","Verify","Summarize"]}"#),
                &token,
            )
            .await
            .unwrap();
        let done = executor
            .execute(
                &call("mark_task_complete", r#"{"index":0,"completionNotes":"5 + 3 = 8"}"#),
                &token,
            )
            .await
            .unwrap();

        assert!(done.result.starts_with("Marked todo 'Add' as complete."));
        assert!(tasks.get_all().await[0].is_completed);
    }

    #[tokio::test]
    async fn image_failures_are_results_not_errors() {
        let (_, executor) = executor();
        let result = executor
            .execute(&call("generate_image", r#"{"prompt":"a fox"}"#), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.result, "Error generating image: image backend offline");
    }

    #[tokio::test]
    async fn dispatch_failures_are_typed() {
        let (_, executor) = executor();
        let token = CancellationToken::new();

        let unknown = executor.execute(&call("delete_all", "{}"), &token).await;
        assert_eq!(unknown, Err(ToolError::NotFound("delete_all".to_string())));

        let malformed = executor.execute(&call("create_tasks", "[1,"), &token).await;
        assert!(matches!(malformed, Err(ToolError::InvalidArguments(_))));

        token.cancel();
        let cancelled = executor
            .execute(&call("create_tasks", r#"{"descriptions":["a"]}"#), &token)
            .await;
        assert_eq!(cancelled, Err(ToolError::Cancelled));
    }
}
