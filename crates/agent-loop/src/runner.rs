use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use agent_core::tools::{parse_tool_args, ToolError, ToolExecutor, ToolResult, ToolSchema};
use agent_core::{AgentError, AgentEvent, ChatMessage, Message, Transcript};
use agent_llm::LLMProvider;

use crate::config::AgentLoopConfig;
use crate::state::LoopState;
use crate::stream::handler::{consume_llm_stream, send_event};

pub type Result<T> = std::result::Result<T, AgentError>;

/// Result of one processed prompt.
#[derive(Debug, Clone)]
pub struct PromptOutcome {
    /// Final model text, or an `Error processing request: ...` message.
    pub report: String,
    /// Every turn of this prompt, including the final report turn.
    pub transcript: Transcript,
    pub rounds: usize,
    pub tool_calls: usize,
}

#[derive(Debug, Default)]
struct Progress {
    rounds: usize,
    tool_calls: usize,
}

/// Runs prompts through the model/tool exchange.
///
/// Holds no per-prompt state: each call builds its own [`Transcript`], so a
/// shared `Orchestrator` never mixes turns between prompts. Callers must
/// still keep to one prompt at a time per task store.
pub struct Orchestrator {
    llm: Arc<dyn LLMProvider>,
    tools: Arc<dyn ToolExecutor>,
    config: AgentLoopConfig,
    label: String,
}

impl Orchestrator {
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        tools: Arc<dyn ToolExecutor>,
        config: AgentLoopConfig,
    ) -> Self {
        Self {
            llm,
            tools,
            config,
            label: "agent".to_string(),
        }
    }

    /// Prefix used in log lines, usually the session id.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn config(&self) -> &AgentLoopConfig {
        &self.config
    }

    /// Process a prompt and return only the final report.
    pub async fn process_prompt(
        &self,
        prompt: &str,
        event_tx: Option<&mpsc::Sender<AgentEvent>>,
        cancel_token: &CancellationToken,
    ) -> Result<String> {
        self.run(prompt, &[], event_tx, cancel_token)
            .await
            .map(|outcome| outcome.report)
    }

    /// Process a prompt.
    ///
    /// `history` is only used when `carry_history` is enabled. Invalid input
    /// and cancellation are errors; every other failure is reported as text
    /// in [`PromptOutcome::report`].
    pub async fn run(
        &self,
        prompt: &str,
        history: &[ChatMessage],
        event_tx: Option<&mpsc::Sender<AgentEvent>>,
        cancel_token: &CancellationToken,
    ) -> Result<PromptOutcome> {
        self.validate_prompt(prompt)?;
        if cancel_token.is_cancelled() {
            return Err(AgentError::Cancelled);
        }

        if log::log_enabled!(log::Level::Debug) {
            let details = serde_json::json!({
                "prompt_chars": prompt.chars().count(),
                "max_rounds": self.config.max_rounds,
                "carry_history": self.config.carry_history,
            });
            log::debug!("[{}] prompt_start: {}", self.label, details);
        }

        let mut transcript = Transcript::new(self.config.system_prompt.clone());
        if self.config.carry_history {
            transcript = transcript.with_history(history);
        }
        transcript.push(Message::user(prompt));

        let mut progress = Progress::default();
        let report = match self
            .drive(&mut transcript, &mut progress, event_tx, cancel_token)
            .await
        {
            Ok(report) => report,
            Err(AgentError::Cancelled) => {
                log::info!("[{}] Prompt cancelled", self.label);
                return Err(AgentError::Cancelled);
            }
            Err(error) => {
                log::error!("[{}] Prompt failed: {}", self.label, error);
                let report = format!("Error processing request: {error}");
                send_event(
                    event_tx,
                    AgentEvent::Error {
                        message: report.clone(),
                    },
                    cancel_token,
                )
                .await?;
                transcript.push(Message::assistant(report.clone(), None));
                report
            }
        };

        if log::log_enabled!(log::Level::Debug) {
            let details = serde_json::json!({
                "rounds": progress.rounds,
                "tool_calls": progress.tool_calls,
                "turns": transcript.len(),
            });
            log::debug!("[{}] prompt_complete: {}", self.label, details);
        }

        Ok(PromptOutcome {
            report,
            transcript,
            rounds: progress.rounds,
            tool_calls: progress.tool_calls,
        })
    }

    fn validate_prompt(&self, prompt: &str) -> Result<()> {
        if prompt.trim().is_empty() {
            return Err(AgentError::InvalidArgument(
                "Prompt cannot be empty.".to_string(),
            ));
        }
        if prompt.chars().count() > self.config.max_prompt_chars {
            return Err(AgentError::InvalidArgument(format!(
                "Prompt exceeds maximum length of {} characters.",
                self.config.max_prompt_chars
            )));
        }
        Ok(())
    }

    async fn drive(
        &self,
        transcript: &mut Transcript,
        progress: &mut Progress,
        event_tx: Option<&mpsc::Sender<AgentEvent>>,
        cancel_token: &CancellationToken,
    ) -> Result<String> {
        let tool_schemas: Vec<ToolSchema> = self.tools.list_tools();

        for round in 0..self.config.max_rounds {
            progress.rounds = round + 1;
            self.enter(LoopState::AwaitingModel);

            let timer = Timer::new("llm_request");
            let stream = tokio::select! {
                biased;
                _ = cancel_token.cancelled() => return Err(AgentError::Cancelled),
                stream = self.llm.chat_stream(transcript.model_view(), &tool_schemas) => {
                    stream.map_err(|e| AgentError::LLM(e.to_string()))?
                }
            };
            let output = consume_llm_stream(stream, event_tx, cancel_token, &self.label).await?;
            timer.debug(&self.label);

            if output.tool_calls.is_empty() {
                self.enter(LoopState::Done);
                transcript.push(Message::assistant(output.content.clone(), None));
                send_event(
                    event_tx,
                    AgentEvent::Complete {
                        rounds: progress.rounds,
                        tool_calls: progress.tool_calls,
                    },
                    cancel_token,
                )
                .await?;
                return Ok(output.content);
            }

            self.enter(LoopState::ToolCallsRequested);
            log::info!(
                "[{}] Round {}: model requested {} tool call(s)",
                self.label,
                round + 1,
                output.tool_calls.len()
            );
            let calls = output.tool_calls;
            transcript.push(Message::assistant(output.content, Some(calls.clone())));

            self.enter(LoopState::ToolsExecuting);
            for call in &calls {
                if cancel_token.is_cancelled() {
                    return Err(AgentError::Cancelled);
                }

                send_event(
                    event_tx,
                    AgentEvent::ToolStart {
                        tool_call_id: call.id.clone(),
                        tool_name: call.function.name.clone(),
                        arguments: parse_tool_args(&call.function.arguments)
                            .unwrap_or_else(|_| serde_json::json!({})),
                    },
                    cancel_token,
                )
                .await?;

                let tool_timer = Timer::new(format!("tool_{}", call.function.name));
                let result = match self.tools.execute(call, cancel_token).await {
                    Ok(result) => result,
                    Err(ToolError::Cancelled) => return Err(AgentError::Cancelled),
                    Err(error) => {
                        log::warn!(
                            "[{}] Tool {} could not be dispatched: {}",
                            self.label,
                            call.function.name,
                            error
                        );
                        ToolResult::failure(format!("Error: {error}"))
                    }
                };
                tool_timer.debug(&self.label);

                transcript.push(Message::tool_result(call.id.clone(), result.result.clone()));
                progress.tool_calls += 1;

                send_event(
                    event_tx,
                    AgentEvent::ToolComplete {
                        tool_call_id: call.id.clone(),
                        tool_name: call.function.name.clone(),
                        result,
                    },
                    cancel_token,
                )
                .await?;
                send_event(
                    event_tx,
                    AgentEvent::ToolProgress {
                        tool_name: call.function.name.clone(),
                    },
                    cancel_token,
                )
                .await?;

                tokio::select! {
                    biased;
                    _ = cancel_token.cancelled() => return Err(AgentError::Cancelled),
                    _ = tokio::time::sleep(self.config.tool_pacing) => {}
                }
            }
        }

        Err(AgentError::MaxRoundsExceeded(self.config.max_rounds))
    }

    fn enter(&self, state: LoopState) {
        log::debug!("[{}] state -> {}", self.label, state);
    }
}

struct Timer {
    name: String,
    start: std::time::Instant,
}

impl Timer {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: std::time::Instant::now(),
        }
    }

    fn debug(&self, label: &str) {
        log::debug!(
            "[{}] {} completed in {}ms",
            label,
            self.name,
            self.start.elapsed().as_millis()
        );
    }
}
