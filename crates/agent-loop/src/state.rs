use std::fmt;

/// Where a prompt is in the model/tool exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    AwaitingModel,
    ToolCallsRequested,
    ToolsExecuting,
    Done,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoopState::AwaitingModel => "awaiting_model",
            LoopState::ToolCallsRequested => "tool_calls_requested",
            LoopState::ToolsExecuting => "tools_executing",
            LoopState::Done => "done",
        };
        f.write_str(name)
    }
}
