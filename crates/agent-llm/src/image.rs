//! Text-to-image generation.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::providers::openai::DEFAULT_BASE_URL;

pub const MAX_IMAGE_PROMPT_CHARS: usize = 1000;
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Provider(String),

    #[error("image generation cancelled")]
    Cancelled,
}

/// Prompt in, `data:` URL out.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ImageError>;
}

/// Blank prompts and prompts over [`MAX_IMAGE_PROMPT_CHARS`] are rejected.
pub fn validate_image_prompt(prompt: &str) -> Result<(), ImageError> {
    if prompt.trim().is_empty() {
        return Err(ImageError::InvalidArgument(
            "Prompt cannot be empty.".to_string(),
        ));
    }
    if prompt.chars().count() > MAX_IMAGE_PROMPT_CHARS {
        return Err(ImageError::InvalidArgument(format!(
            "Prompt cannot exceed {MAX_IMAGE_PROMPT_CHARS} characters."
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    b64_json: Option<String>,
}

/// `POST {base_url}/images/generations` returning base64 PNG data.
pub struct OpenAIImageGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIImageGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn request(&self, prompt: &str) -> Result<String, ImageError> {
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "n": 1,
            "size": "1024x1024",
            "quality": "standard",
            "style": "vivid",
            "response_format": "b64_json",
        });

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ImageError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ImageError::Provider(format!("HTTP {}: {}", status, text)));
        }

        let parsed: GenerationResponse = response
            .json()
            .await
            .map_err(|e| ImageError::Provider(e.to_string()))?;

        let payload = parsed
            .data
            .into_iter()
            .find_map(|image| image.b64_json)
            .ok_or_else(|| ImageError::Provider("No image data returned".to_string()))?;

        Ok(format!("data:image/png;base64,{payload}"))
    }
}

#[async_trait]
impl ImageGenerator for OpenAIImageGenerator {
    async fn generate_image(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ImageError> {
        validate_image_prompt(prompt)?;
        if cancel.is_cancelled() {
            return Err(ImageError::Cancelled);
        }

        log::info!("Generating image ({} chars of prompt)", prompt.chars().count());
        let result = tokio::select! {
            _ = cancel.cancelled() => Err(ImageError::Cancelled),
            result = self.request(prompt) => result,
        };

        match &result {
            Ok(url) => log::info!("Image generated ({} bytes of data URL)", url.len()),
            Err(ImageError::Cancelled) => log::info!("Image generation cancelled"),
            Err(e) => log::error!("Image generation failed: {}", e),
        }
        result
    }
}
