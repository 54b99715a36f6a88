//! User-visible chat transcript for a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("{0}")]
    InvalidArgument(String),
}

/// A message shown to the user. Never mutated once created; the store only
/// appends and clears.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_streaming: bool,
}

impl ChatMessage {
    /// Build a message for `role`, enforcing the content rules of that role.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Result<Self, ChatError> {
        match role {
            ChatRole::User => Self::user(content),
            ChatRole::System => Self::system(content),
            ChatRole::Assistant => Ok(Self::assistant(content, false)),
        }
    }

    pub fn user(content: impl Into<String>) -> Result<Self, ChatError> {
        Ok(Self::build(ChatRole::User, require_content(content.into())?, false))
    }

    /// Assistant content may be empty while `is_streaming` is set.
    pub fn assistant(content: impl Into<String>, is_streaming: bool) -> Self {
        Self::build(ChatRole::Assistant, content.into(), is_streaming)
    }

    pub fn system(content: impl Into<String>) -> Result<Self, ChatError> {
        Ok(Self::build(ChatRole::System, require_content(content.into())?, false))
    }

    fn build(role: ChatRole, content: String, is_streaming: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            timestamp: Utc::now(),
            is_streaming,
        }
    }
}

fn require_content(content: String) -> Result<String, ChatError> {
    if content.trim().is_empty() {
        return Err(ChatError::InvalidArgument(
            "Content cannot be empty.".to_string(),
        ));
    }
    Ok(content)
}

/// Append-only, mutex-guarded message log.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, message: ChatMessage) {
        self.messages.lock().await.push(message);
    }

    /// Append several messages under one lock acquisition so readers never
    /// observe half of a batch.
    pub async fn extend<I>(&self, messages: I)
    where
        I: IntoIterator<Item = ChatMessage>,
    {
        self.messages.lock().await.extend(messages);
    }

    pub async fn get_all(&self) -> Vec<ChatMessage> {
        self.messages.lock().await.clone()
    }

    pub async fn clear(&self) {
        self.messages.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.lock().await.is_empty()
    }
}
