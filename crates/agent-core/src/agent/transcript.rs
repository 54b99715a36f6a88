//! Model-facing transcript with a user-facing projection.
//!
//! One prompt builds one `Transcript`: the system instruction, optionally
//! some earlier visible history, the new user turn, and then every
//! assistant/tool turn produced while the loop runs. The same value yields
//! the full view sent to the model and the filtered view shown to users.

use uuid::Uuid;

use crate::agent::types::{Message, Role};
use crate::chat::{ChatMessage, ChatRole};

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Message>,
    /// Number of leading turns (system instruction and seeded history)
    /// that belong to earlier prompts and are excluded from `user_view`.
    seeded: usize,
}

impl Transcript {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        let system_instruction = system_instruction.into();
        let turns = if system_instruction.trim().is_empty() {
            Vec::new()
        } else {
            vec![Message::system(system_instruction)]
        };
        let seeded = turns.len();
        Self { turns, seeded }
    }

    /// Seed the transcript with visible history from earlier prompts.
    ///
    /// Only user and assistant messages are carried over; system notices and
    /// streaming placeholders are skipped.
    pub fn with_history(mut self, history: &[ChatMessage]) -> Self {
        let carried = history.iter().filter_map(|message| {
            if message.is_streaming || message.content.trim().is_empty() {
                return None;
            }
            match message.role {
                ChatRole::User => Some(Message::user(message.content.clone())),
                ChatRole::Assistant => Some(Message::assistant(message.content.clone(), None)),
                ChatRole::System => None,
            }
        });
        self.turns.extend(carried);
        self.seeded = self.turns.len();
        self
    }

    pub fn push(&mut self, message: Message) {
        self.turns.push(message);
    }

    /// Every turn, in order, as submitted to the model provider.
    pub fn model_view(&self) -> &[Message] {
        &self.turns
    }

    /// The turns produced for the current prompt that a user should see:
    /// user turns and assistant turns carrying text without tool calls.
    pub fn user_view(&self) -> Vec<ChatMessage> {
        self.turns[self.seeded..]
            .iter()
            .filter_map(|message| {
                let role = match message.role {
                    Role::User => ChatRole::User,
                    Role::Assistant if !message.requests_tools() => ChatRole::Assistant,
                    _ => return None,
                };
                if message.content.trim().is_empty() {
                    return None;
                }
                Some(ChatMessage {
                    id: Uuid::parse_str(&message.id).unwrap_or_else(|_| Uuid::new_v4()),
                    role,
                    content: message.content.clone(),
                    timestamp: message.created_at,
                    is_streaming: false,
                })
            })
            .collect()
    }

    pub fn last(&self) -> Option<&Message> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
