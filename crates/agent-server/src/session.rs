//! One isolated agent workspace: a checklist, a conversation and the loop
//! that drives them.

use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use agent_core::{
    AgentError, AgentEvent, ChatError, ChatMessage, ConversationStore, Role, TaskStore, TodoItem,
    Transcript,
};
use agent_llm::{ImageGenerator, LLMProvider};
use agent_loop::{AgentLoopConfig, Orchestrator};
use agent_tools::{extract_image_markers, TaskToolExecutor};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio_util::sync::CancellationToken;

pub const CANCELLED_NOTICE: &str = "Request cancelled.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("A prompt is already being processed for this session.")]
    Busy,

    #[error("Session not found: {0}")]
    NotFound(String),
}

impl SessionError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SessionError::Agent(e) if e.is_cancelled())
    }
}

pub struct AgentSession {
    id: String,
    created_at: DateTime<Utc>,
    tasks: Arc<TaskStore>,
    conversation: ConversationStore,
    orchestrator: Orchestrator,
    /// Held for the whole of a prompt; `try_lock` failing means busy.
    busy: Mutex<()>,
    in_flight: StdMutex<Option<CancellationToken>>,
    current_report: RwLock<Option<String>>,
    current_images: RwLock<Vec<String>>,
}

/// Empties the in-flight slot when a prompt ends, including when its future
/// is dropped before completion.
struct InFlight<'a> {
    slot: &'a StdMutex<Option<CancellationToken>>,
}

impl<'a> InFlight<'a> {
    fn enter(slot: &'a StdMutex<Option<CancellationToken>>, token: CancellationToken) -> Self {
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
        Self { slot }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Image payloads produced while answering the current prompt, in order and
/// without repeats. Seeded history never carries tool turns, so only this
/// prompt's tool results and its final report are scanned.
fn collect_images(transcript: &Transcript, report: &str) -> Vec<String> {
    let mut images: Vec<String> = Vec::new();
    let tool_turns = transcript
        .model_view()
        .iter()
        .filter(|message| message.role == Role::Tool)
        .map(|message| message.content.as_str());
    for text in tool_turns.chain(std::iter::once(report)) {
        for payload in extract_image_markers(text) {
            if !images.contains(&payload) {
                images.push(payload);
            }
        }
    }
    images
}

impl AgentSession {
    pub fn new(
        id: impl Into<String>,
        llm: Arc<dyn LLMProvider>,
        images: Arc<dyn ImageGenerator>,
        config: AgentLoopConfig,
    ) -> Self {
        let id = id.into();
        let tasks = Arc::new(TaskStore::new());
        let tools = Arc::new(TaskToolExecutor::new(Arc::clone(&tasks), images));
        let orchestrator = Orchestrator::new(llm, tools, config).with_label(id.clone());

        Self {
            id,
            created_at: Utc::now(),
            tasks,
            conversation: ConversationStore::new(),
            orchestrator,
            busy: Mutex::new(()),
            in_flight: StdMutex::new(None),
            current_report: RwLock::new(None),
            current_images: RwLock::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub async fn todos(&self) -> Vec<TodoItem> {
        self.tasks.get_all().await
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.conversation.get_all().await
    }

    pub async fn add_message(&self, message: ChatMessage) {
        self.conversation.append(message).await;
    }

    /// Last report produced by a completed prompt.
    pub async fn current_report(&self) -> Option<String> {
        self.current_report.read().await.clone()
    }

    /// Images generated by the last completed prompt.
    pub async fn current_images(&self) -> Vec<String> {
        self.current_images.read().await.clone()
    }

    pub fn is_processing(&self) -> bool {
        self.busy.try_lock().is_err()
    }

    /// Empty the checklist and conversation, cancelling any prompt in flight.
    pub async fn clear(&self) {
        self.cancel();
        // The cancelled prompt still records its notice before releasing.
        let _busy = self.busy.lock().await;
        self.tasks.clear().await;
        self.conversation.clear().await;
        *self.current_report.write().await = None;
        self.current_images.write().await.clear();
        log::info!("[{}] Session cleared", self.id);
    }

    /// Cancel the prompt in flight. Returns `false` when there is none.
    pub fn cancel(&self) -> bool {
        let slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(token) => {
                token.cancel();
                log::info!("[{}] Cancellation requested", self.id);
                true
            }
            None => false,
        }
    }

    /// Run one prompt to completion.
    ///
    /// On success the user-facing turns of the prompt are appended to the
    /// conversation. On cancellation the prompt and a cancellation notice
    /// are recorded instead, and the error is returned.
    pub async fn process_prompt(
        &self,
        prompt: &str,
        observer: Option<mpsc::Sender<AgentEvent>>,
        cancel: CancellationToken,
    ) -> Result<String, SessionError> {
        let _busy = self.busy.try_lock().map_err(|_| SessionError::Busy)?;
        let in_flight = InFlight::enter(&self.in_flight, cancel.clone());

        let history = if self.orchestrator.config().carry_history {
            self.conversation.get_all().await
        } else {
            Vec::new()
        };
        let result = self
            .orchestrator
            .run(prompt, &history, observer.as_ref(), &cancel)
            .await;

        drop(in_flight);

        match result {
            Ok(outcome) => {
                log::info!(
                    "[{}] Prompt finished after {} round(s), {} tool call(s)",
                    self.id,
                    outcome.rounds,
                    outcome.tool_calls
                );
                self.conversation
                    .extend(outcome.transcript.user_view())
                    .await;
                *self.current_images.write().await =
                    collect_images(&outcome.transcript, &outcome.report);
                *self.current_report.write().await = Some(outcome.report.clone());
                Ok(outcome.report)
            }
            Err(AgentError::Cancelled) => {
                if let Ok(message) = ChatMessage::user(prompt) {
                    self.conversation.append(message).await;
                }
                if let Ok(notice) = ChatMessage::system(CANCELLED_NOTICE) {
                    self.conversation.append(notice).await;
                }
                Err(AgentError::Cancelled.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
