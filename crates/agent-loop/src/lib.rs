//! The tool-calling loop that drives one prompt to a final report.

pub mod config;
pub mod prompt;
pub mod runner;
pub mod state;
pub mod stream;

pub use config::AgentLoopConfig;
pub use prompt::SYSTEM_INSTRUCTION;
pub use runner::{Orchestrator, PromptOutcome};
pub use state::LoopState;
