//! SSE stream creation and chunk mapping for the Gemini API.
//!
//! With `alt=sse`, every `data:` line is a complete `GenerateContentResponse`
//! JSON object:
//! 1. `candidates[0].content.parts[].text` -- incremental text
//! 2. `candidates[0].finishReason` -- present on the last chunk
//! 3. `usageMetadata` -- token counts, usually on the last chunk
//! 4. `promptFeedback.blockReason` -- the prompt was rejected
//! 5. `error` -- a failure reported after the stream started
//!
//! A block reason, or a `SAFETY`/`RECITATION` finish reason, ends the stream
//! with [`LlmError::Blocked`] before any text from that chunk is yielded.
//!
//! The stream ends when the server closes the connection; there is no
//! terminal sentinel event.

use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};

use daydream_core::llm::provider::EventStream;
use daydream_types::llm::{LlmError, StopReason, StreamEvent, Usage};

use super::types::{ErrorEnvelope, GeminiRequest, GenerateContentResponse};

/// Create a streaming SSE connection to `streamGenerateContent`.
///
/// Returns a `Stream` of [`StreamEvent`]s: `Connected` once the response
/// headers arrive, then the mapped chunk events, then `Done`.
///
/// # Arguments
///
/// * `client` - Shared reqwest HTTP client
/// * `url` - Full API URL including `?alt=sse`
/// * `body` - Gemini request body
/// * `api_key` - API key wrapped in SecretString
pub fn create_gemini_stream(
    client: &reqwest::Client,
    url: &str,
    body: GeminiRequest,
    api_key: &SecretString,
) -> EventStream {
    let client = client.clone();
    let url = url.to_string();
    let api_key = api_key.expose_secret().to_string();

    Box::pin(async_stream::try_stream! {
        let response = client
            .post(&url)
            .header("x-goog-api-key", &api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let response = check_status(response).await?;

        yield StreamEvent::Connected;

        let mut events = response.bytes_stream().eventsource();
        while let Some(event) = events.next().await {
            let event = event.map_err(|e| LlmError::Stream(format!("SSE read: {e}")))?;
            if event.data.trim().is_empty() {
                continue;
            }
            tracing::trace!(data = %event.data, "gemini chunk");

            for ev in process_chunk(&event.data)? {
                yield ev;
            }
        }

        yield StreamEvent::Done;
    })
}

/// Pass a successful response through; turn anything else into an error.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = error_body_or_empty(status.as_u16(), response.text().await);
    tracing::warn!(status = %status, body = %error_body, "Gemini stream API error response");
    Err(error_from_body(status.as_u16(), &error_body))
}

/// Unwrap an error body read, logging the read failure before falling back
/// to an empty body.
fn error_body_or_empty<E: std::fmt::Display>(status: u16, read: Result<String, E>) -> String {
    match read {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(status, error = %e, "failed to read Gemini error body");
            String::new()
        }
    }
}

/// Map a non-2xx response body to an [`LlmError`].
///
/// Prefers the structured RPC error so the reason and help links survive;
/// falls back to the status code when the body is not the expected shape.
pub fn error_from_body(status: u16, body: &str) -> LlmError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        let mut details = envelope.error;
        if details.code == 0 {
            details.code = status;
        }
        return LlmError::Api(details);
    }

    match status {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited,
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {body}"),
        },
    }
}

/// Map one SSE `data:` payload to stream events.
///
/// Requests never ask for more than one candidate, so only the first is
/// rendered; any others are ignored rather than interleaved into the story.
/// Empty text parts are dropped.
pub fn process_chunk(data: &str) -> Result<Vec<StreamEvent>, LlmError> {
    let value: serde_json::Value = serde_json::from_str(data)
        .map_err(|e| LlmError::Deserialization(format!("gemini chunk: {e}")))?;

    if value.get("error").is_some() {
        let envelope: ErrorEnvelope = serde_json::from_value(value)
            .map_err(|e| LlmError::Deserialization(format!("gemini error chunk: {e}")))?;
        return Err(LlmError::Api(envelope.error));
    }

    let chunk: GenerateContentResponse = serde_json::from_value(value)
        .map_err(|e| LlmError::Deserialization(format!("gemini chunk: {e}")))?;

    if let Some(reason) = chunk.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(LlmError::Blocked { reason });
    }

    let mut events = Vec::new();

    if let Some(candidate) = chunk.candidates.into_iter().next() {
        if let Some(reason @ ("SAFETY" | "RECITATION")) = candidate.finish_reason.as_deref() {
            return Err(LlmError::Blocked {
                reason: reason.to_string(),
            });
        }
        if let Some(content) = candidate.content {
            for text in content.parts.into_iter().filter_map(|p| p.text) {
                if !text.is_empty() {
                    events.push(StreamEvent::TextDelta { text });
                }
            }
        }
        if let Some(reason) = candidate.finish_reason.as_deref() {
            events.push(StreamEvent::MessageDelta {
                stop_reason: map_finish_reason(reason),
            });
        }
    }

    if let Some(usage) = chunk.usage_metadata {
        events.push(StreamEvent::Usage(Usage {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
        }));
    }

    Ok(events)
}

fn map_finish_reason(reason: &str) -> StopReason {
    match reason {
        "STOP" => StopReason::EndTurn,
        "MAX_TOKENS" => StopReason::MaxTokens,
        _ => StopReason::Other,
    }
}
