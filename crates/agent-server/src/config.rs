use std::path::{Path, PathBuf};
use std::time::Duration;

use agent_loop::AgentLoopConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE_PATH: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set and no api_key was found in the config file")]
    MissingApiKey,
}

/// Service configuration.
///
/// Sources, later ones winning: `$HOME/.todo-agent/config.json` (or
/// `./config.toml` when the JSON file is absent), environment variables,
/// then command-line flags applied by the binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub chat_model: Option<String>,
    pub image_model: Option<String>,
    pub tool_pacing_ms: Option<u64>,
    pub carry_history: bool,
}

pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".todo-agent")
}

pub fn parse_bool_env(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

impl Config {
    pub fn load() -> Self {
        Self::from_sources(
            &config_dir().join("config.json"),
            Path::new(CONFIG_FILE_PATH),
            |key| std::env::var(key).ok(),
        )
    }

    pub fn from_sources(
        json_path: &Path,
        toml_path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let mut config = Self::read_json(json_path)
            .or_else(|| Self::read_toml(toml_path))
            .unwrap_or_default();
        config.apply_env(env);
        config
    }

    fn read_json(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(config) => {
                log::info!("Loaded config from {:?}", path);
                Some(config)
            }
            Err(e) => {
                log::warn!("Ignoring malformed config {:?}: {}", path, e);
                None
            }
        }
    }

    fn read_toml(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                log::info!("Loaded config from {:?}", path);
                Some(config)
            }
            Err(e) => {
                log::warn!("Ignoring malformed config {:?}: {}", path, e);
                None
            }
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(api_key) = env("OPENAI_API_KEY") {
            self.api_key = Some(api_key);
        }
        if let Some(base_url) = env("OPENAI_BASE_URL") {
            self.base_url = Some(base_url);
        }
        if let Some(model) = env("CHAT_MODEL") {
            self.chat_model = Some(model);
        }
        if let Some(model) = env("IMAGE_MODEL") {
            self.image_model = Some(model);
        }
        if let Some(pacing) = env("TOOL_PACING_MS") {
            match pacing.trim().parse() {
                Ok(ms) => self.tool_pacing_ms = Some(ms),
                Err(_) => log::warn!("Ignoring TOOL_PACING_MS={:?}", pacing),
            }
        }
        if let Some(carry) = env("CARRY_HISTORY") {
            self.carry_history = parse_bool_env(&carry);
        }
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    pub fn loop_config(&self) -> AgentLoopConfig {
        let mut config = AgentLoopConfig {
            carry_history: self.carry_history,
            ..AgentLoopConfig::default()
        };
        if let Some(ms) = self.tool_pacing_ms {
            config.tool_pacing = Duration::from_millis(ms);
        }
        config
    }
}
