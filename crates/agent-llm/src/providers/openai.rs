use async_trait::async_trait;
use reqwest::Client;

use crate::provider::{LLMError, LLMProvider, LLMStream, Result};
use agent_core::{tools::ToolSchema, Message};

use super::common::openai_compat::{build_chat_request, parse_stream_data};
use super::common::sse::stream_from_sse;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";

/// Streaming chat completions against an OpenAI-compatible endpoint.
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
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

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn chat_stream(&self, messages: &[Message], tools: &[ToolSchema]) -> Result<LLMStream> {
        let body = build_chat_request(&self.model, messages, tools);
        log::debug!(
            "POST {}/chat/completions model={} messages={} tools={}",
            self.base_url,
            self.model,
            messages.len(),
            tools.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(LLMError::Api(format!("HTTP {}: {}", status, text)));
        }

        Ok(stream_from_sse(response, parse_stream_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LLMChunk;
    use futures::StreamExt;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn network_tests_disabled() -> bool {
        std::env::var_os("CODEX_SANDBOX_NETWORK_DISABLED").is_some()
    }

    async fn collect(provider: &OpenAIProvider) -> Result<Vec<LLMChunk>> {
        let mut stream = provider
            .chat_stream(&[Message::user("Calculate 5 + 3")], &[])
            .await?;
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.push(chunk?);
        }
        Ok(out)
    }

    #[test]
    fn builders_override_defaults() {
        let provider = OpenAIProvider::new("sk-test");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(provider.model(), DEFAULT_CHAT_MODEL);

        let provider = provider
            .with_base_url("http://localhost:8080/v1/")
            .with_model("gpt-4o-mini");
        assert_eq!(provider.base_url, "http://localhost:8080/v1");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    #[tokio::test]
    async fn streams_tokens_and_tool_calls() {
        if network_tests_disabled() {
            return;
        }

        let server = MockServer::start().await;
        let body = concat!(
            "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"Planning\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"tool_calls\":[{\"index\":0,\"id\":\"call_1\",\"type\":\"function\",\"function\":{\"name\":\"create_tasks\",\"arguments\":\"{}\"}}]}}]}\n\n",
            "data: [DONE]\n\n",
        );
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({"model": "gpt-4o", "stream": true})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(body),
            )
            .mount(&server)
            .await;

        let provider = OpenAIProvider::new("sk-test").with_base_url(server.uri());
        let chunks = collect(&provider).await.expect("stream");

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], LLMChunk::Token("Planning".to_string()));
        assert!(matches!(&chunks[1], LLMChunk::ToolCalls(calls) if calls[0].function.name == "create_tasks"));
        assert_eq!(chunks[2], LLMChunk::Done);
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        if network_tests_disabled() {
            return;
        }

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let provider = OpenAIProvider::new("bad").with_base_url(server.uri());
        match collect(&provider).await {
            Err(LLMError::Api(message)) => {
                assert!(message.contains("401"));
                assert!(message.contains("invalid api key"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }
}
