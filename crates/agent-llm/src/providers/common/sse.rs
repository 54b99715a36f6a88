//! SSE response to [`LLMStream`] adapter.

use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::Response;

use crate::provider::{LLMError, LLMStream, Result};
use crate::types::LLMChunk;

/// Turn an event-stream response into an [`LLMStream`].
///
/// `decode` sees each event's `data` payload. `Ok(None)` skips the event and
/// any error is surfaced as [`LLMError::Stream`].
pub fn stream_from_sse<D>(response: Response, mut decode: D) -> LLMStream
where
    D: FnMut(&str) -> Result<Option<LLMChunk>> + Send + 'static,
{
    let stream = response
        .bytes_stream()
        .eventsource()
        .filter_map(move |event| {
            let item = match event {
                Ok(event) => decode(event.data.as_str()).transpose(),
                Err(e) => Some(Err(LLMError::Stream(e.to_string()))),
            };
            let item = item.map(|result| {
                result.map_err(|err| match err {
                    LLMError::Stream(msg) => LLMError::Stream(msg),
                    other => LLMError::Stream(other.to_string()),
                })
            });
            futures::future::ready(item)
        });

    Box::pin(stream)
}
