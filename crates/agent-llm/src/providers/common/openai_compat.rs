//! Chat completions wire format.
//!
//! Builds request bodies from transcript turns without leaking internal
//! fields (`id`, `created_at`) and decodes streamed `data:` payloads.

use agent_core::tools::{FunctionCall, ToolCall, ToolSchema};
use agent_core::{agent::Role, Message};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::provider::Result;
use crate::types::LLMChunk;

fn role_name(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

pub fn to_wire_messages(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            let mut wire = json!({
                "role": role_name(message.role),
                "content": message.content,
            });

            if let Some(tool_call_id) = &message.tool_call_id {
                wire["tool_call_id"] = json!(tool_call_id);
            }
            if let Some(tool_calls) = &message.tool_calls {
                wire["tool_calls"] = json!(tool_calls);
            }

            wire
        })
        .collect()
}

/// Streaming request body. `tools` is omitted when empty, since some
/// compatible servers reject an empty array.
pub fn build_chat_request(model: &str, messages: &[Message], tools: &[ToolSchema]) -> Value {
    let mut body = json!({
        "model": model,
        "messages": to_wire_messages(messages),
        "stream": true,
    });

    if !tools.is_empty() {
        body["tools"] = json!(tools);
        body["tool_choice"] = json!("auto");
    }

    body
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Deserialize, Default)]
struct StreamDelta {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCallDelta>>,
}

#[derive(Debug, Deserialize)]
struct ToolCallDelta {
    id: Option<String>,
    #[serde(rename = "type")]
    tool_type: Option<String>,
    function: Option<FunctionDelta>,
}

#[derive(Debug, Deserialize, Default)]
struct FunctionDelta {
    name: Option<String>,
    arguments: Option<String>,
}

impl From<ToolCallDelta> for ToolCall {
    fn from(delta: ToolCallDelta) -> Self {
        let function = delta.function.unwrap_or_default();
        ToolCall {
            id: delta.id.unwrap_or_default(),
            tool_type: delta.tool_type.unwrap_or_default(),
            function: FunctionCall {
                name: function.name.unwrap_or_default(),
                arguments: function.arguments.unwrap_or_default(),
            },
        }
    }
}

/// Decode one SSE `data:` payload.
///
/// `[DONE]` maps to [`LLMChunk::Done`]; deltas without content or tool calls
/// map to `Ok(None)`; malformed JSON is an error.
pub fn parse_stream_data(data: &str) -> Result<Option<LLMChunk>> {
    let data = data.trim();
    if data.is_empty() {
        return Ok(None);
    }
    if data == "[DONE]" {
        return Ok(Some(LLMChunk::Done));
    }

    let chunk: StreamChunk = serde_json::from_str(data)?;
    let Some(choice) = chunk.choices.into_iter().next() else {
        return Ok(None);
    };

    if let Some(deltas) = choice.delta.tool_calls {
        let calls: Vec<ToolCall> = deltas.into_iter().map(ToolCall::from).collect();
        if !calls.is_empty() {
            return Ok(Some(LLMChunk::ToolCalls(calls)));
        }
    }

    match choice.delta.content {
        Some(content) if !content.is_empty() => Ok(Some(LLMChunk::Token(content))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use agent_core::tools::FunctionSchema;

    use super::*;

    #[test]
    fn wire_messages_omit_internal_fields() {
        let out = to_wire_messages(&[Message::user("Hello")]);

        assert_eq!(out[0]["role"], "user");
        assert_eq!(out[0]["content"], "Hello");
        assert!(out[0].get("id").is_none());
        assert!(out[0].get("created_at").is_none());
    }

    #[test]
    fn wire_messages_carry_tool_linkage() {
        let call = ToolCall {
            id: "call_1".to_string(),
            tool_type: "function".to_string(),
            function: FunctionCall {
                name: "create_tasks".to_string(),
                arguments: r#"{"descriptions":["a"]}"#.to_string(),
            },
        };
        let out = to_wire_messages(&[
            Message::assistant("", Some(vec![call])),
            Message::tool_result("call_1", "Created 1 todo(s):\n- a"),
        ]);

        assert_eq!(out[0]["tool_calls"][0]["id"], "call_1");
        assert_eq!(out[0]["tool_calls"][0]["type"], "function");
        assert_eq!(out[1]["role"], "tool");
        assert_eq!(out[1]["tool_call_id"], "call_1");
    }

    #[test]
    fn request_body_includes_tools_when_present() {
        let tools = vec![ToolSchema {
            schema_type: "function".to_string(),
            function: FunctionSchema {
                name: "generate_image".to_string(),
                description: "Generate an image".to_string(),
                parameters: json!({"type": "object"}),
            },
        }];
        let messages = vec![Message::system("sys"), Message::user("draw")];

        let body = build_chat_request("gpt-4o", &messages, &tools);
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["tools"][0]["function"]["name"], "generate_image");
        assert_eq!(body["tool_choice"], "auto");

        let bare = build_chat_request("gpt-4o", &messages, &[]);
        assert!(bare.get("tools").is_none());
    }

    #[test]
    fn content_delta_becomes_token() {
        let data = r#"{"id":"c1","choices":[{"delta":{"content":"Hello"}}]}"#;
        assert_eq!(
            parse_stream_data(data).unwrap(),
            Some(LLMChunk::Token("Hello".to_string()))
        );
    }

    #[test]
    fn tool_call_delta_keeps_partial_fields() {
        let data = r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"id":"call_1","type":"function","function":{"name":"create_tasks"}}]}}]}"#;
        let Some(LLMChunk::ToolCalls(calls)) = parse_stream_data(data).unwrap() else {
            panic!("expected tool calls");
        };
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].function.name, "create_tasks");
        assert_eq!(calls[0].function.arguments, "");

        let continuation = r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"arguments":"{}"}}]}}]}"#;
        let Some(LLMChunk::ToolCalls(calls)) = parse_stream_data(continuation).unwrap() else {
            panic!("expected tool calls");
        };
        assert!(calls[0].id.is_empty());
        assert_eq!(calls[0].function.arguments, "{}");
    }

    #[test]
    fn done_and_empty_payloads() {
        assert_eq!(parse_stream_data(" [DONE] ").unwrap(), Some(LLMChunk::Done));
        assert_eq!(parse_stream_data("").unwrap(), None);
        assert_eq!(
            parse_stream_data(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#).unwrap(),
            None
        );
        assert_eq!(parse_stream_data(r#"{"choices":[]}"#).unwrap(), None);
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(parse_stream_data("{not json}").is_err());
    }
}
