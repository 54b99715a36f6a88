use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use agent_core::tools::{ToolCall, ToolCallAccumulator};
use agent_core::{AgentError, AgentEvent};
use agent_llm::{LLMChunk, LLMStream};

/// One model round folded into a single response.
#[derive(Debug, Default)]
pub struct StreamHandlingOutput {
    pub content: String,
    /// Empty when the model finished with text.
    pub tool_calls: Vec<ToolCall>,
}

/// Deliver `event` to the observer, giving up as soon as `cancel_token` fires
/// so a stalled receiver cannot hold the loop.
pub(crate) async fn send_event(
    event_tx: Option<&mpsc::Sender<AgentEvent>>,
    event: AgentEvent,
    cancel_token: &CancellationToken,
) -> Result<(), AgentError> {
    let Some(tx) = event_tx else {
        return Ok(());
    };
    tokio::select! {
        biased;
        _ = cancel_token.cancelled() => Err(AgentError::Cancelled),
        _ = tx.send(event) => Ok(()),
    }
}

pub async fn consume_llm_stream(
    mut stream: LLMStream,
    event_tx: Option<&mpsc::Sender<AgentEvent>>,
    cancel_token: &CancellationToken,
    session_id: &str,
) -> Result<StreamHandlingOutput, AgentError> {
    let mut content = String::new();
    let mut tool_calls = ToolCallAccumulator::new();

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel_token.cancelled() => return Err(AgentError::Cancelled),
            next = stream.next() => next,
        };
        let Some(chunk_result) = next else {
            break;
        };

        match chunk_result {
            Ok(LLMChunk::Token(token)) => {
                if token.is_empty() {
                    continue;
                }
                content.push_str(&token);
                send_event(event_tx, AgentEvent::Token { content: token }, cancel_token).await?;
            }
            Ok(LLMChunk::ToolCalls(partial_calls)) => {
                log::debug!(
                    "[{}] Received {} tool call parts",
                    session_id,
                    partial_calls.len()
                );
                tool_calls.extend(partial_calls);
            }
            Ok(LLMChunk::Done) => {
                log::debug!("[{}] LLM stream completed", session_id);
                break;
            }
            Err(error) => {
                send_event(
                    event_tx,
                    AgentEvent::Error {
                        message: format!("Stream error: {error}"),
                    },
                    cancel_token,
                )
                .await?;
                return Err(AgentError::LLM(error.to_string()));
            }
        }
    }

    Ok(StreamHandlingOutput {
        content,
        tool_calls: tool_calls.finalize(),
    })
}
