use agent_core::tools::ToolCall;

/// One piece of a streamed chat completion.
#[derive(Debug, Clone, PartialEq)]
pub enum LLMChunk {
    Token(String),
    /// Tool call fragments; arguments may be split across chunks.
    ToolCalls(Vec<ToolCall>),
    Done,
}
