use std::collections::HashMap;
use std::sync::Arc;

use agent_llm::{ImageGenerator, LLMProvider, OpenAIImageGenerator, OpenAIProvider};
use agent_loop::AgentLoopConfig;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::{Config, ConfigError};
use crate::session::{AgentSession, SessionError};

pub struct AppState {
    pub sessions: RwLock<HashMap<String, Arc<AgentSession>>>,
    pub llm: Arc<dyn LLMProvider>,
    pub images: Arc<dyn ImageGenerator>,
    pub loop_config: AgentLoopConfig,
}

impl AppState {
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        images: Arc<dyn ImageGenerator>,
        loop_config: AgentLoopConfig,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            llm,
            images,
            loop_config,
        }
    }

    /// Build the OpenAI-backed providers described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?;

        let mut chat = OpenAIProvider::new(api_key);
        let mut images = OpenAIImageGenerator::new(api_key);
        if let Some(base_url) = &config.base_url {
            chat = chat.with_base_url(base_url.clone());
            images = images.with_base_url(base_url.clone());
        }
        if let Some(model) = &config.chat_model {
            chat = chat.with_model(model.clone());
        }
        if let Some(model) = &config.image_model {
            images = images.with_model(model.clone());
        }
        log::info!("Using chat model: {}", chat.model());

        Ok(Self::new(
            Arc::new(chat),
            Arc::new(images),
            config.loop_config(),
        ))
    }

    pub async fn create_session(&self) -> Arc<AgentSession> {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(AgentSession::new(
            id.clone(),
            Arc::clone(&self.llm),
            Arc::clone(&self.images),
            self.loop_config.clone(),
        ));
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::clone(&session));
        log::info!("[{}] Session created", id);
        session
    }

    pub async fn session(&self, id: &str) -> Result<Arc<AgentSession>, SessionError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
