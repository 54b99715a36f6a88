use std::time::Duration;

use crate::prompt::SYSTEM_INSTRUCTION;

pub const DEFAULT_MAX_ROUNDS: usize = 50;
pub const DEFAULT_TOOL_PACING: Duration = Duration::from_millis(100);
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 10_000;

/// Configuration for the agent loop.
#[derive(Debug, Clone)]
pub struct AgentLoopConfig {
    /// Model rounds allowed before the prompt is abandoned.
    pub max_rounds: usize,
    pub system_prompt: String,
    /// Pause after each tool call so observers can refresh.
    pub tool_pacing: Duration,
    pub max_prompt_chars: usize,
    /// Seed each prompt's transcript with the session's visible history.
    pub carry_history: bool,
}

impl Default for AgentLoopConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            system_prompt: SYSTEM_INSTRUCTION.to_string(),
            tool_pacing: DEFAULT_TOOL_PACING,
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            carry_history: false,
        }
    }
}
