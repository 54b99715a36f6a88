use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("LLM error: {0}")]
    LLM(String),

    #[error("exceeded {0} model rounds without a final answer")]
    MaxRoundsExceeded(usize),

    #[error("Cancelled")]
    Cancelled,
}

impl AgentError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AgentError::Cancelled)
    }
}
