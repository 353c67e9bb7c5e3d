//! LLM request/response types for Daydream.
//!
//! These types model the data shapes for provider interactions: conversation
//! turns, streaming requests, streaming events and error handling. They are
//! provider-agnostic; wire formats live next to each provider in
//! `daydream-infra`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a turn in the conversation history.
///
/// The system instruction is not a turn; it travels separately on the
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Model => write!(f, "model"),
        }
    }
}

/// A single role-tagged turn in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Model,
            content: content.into(),
        }
    }
}

/// Request to an LLM provider for a streamed completion.
///
/// `messages` holds the prior history followed by the new user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier; empty means the provider's configured default.
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// Reason why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    Other,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndTurn => write!(f, "end_turn"),
            StopReason::MaxTokens => write!(f, "max_tokens"),
            StopReason::Other => write!(f, "other"),
        }
    }
}

/// Token usage for a completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Events emitted during a streaming response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Connection established with the provider.
    Connected,

    /// One incremental fragment of response text.
    TextDelta { text: String },

    /// The model reported why it stopped.
    MessageDelta { stop_reason: StopReason },

    /// Token usage information.
    Usage(Usage),

    /// The stream has completed.
    Done,
}

/// A documentation link attached to a provider error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpLink {
    #[serde(default)]
    pub description: String,
    pub url: String,
}

/// Structured error returned by the remote API.
///
/// Mirrors the Google RPC status shape: a numeric code, a symbolic status,
/// a human-readable message and a list of typed detail entries. The reason
/// code and help links are extracted from the `ErrorInfo` and `Help` details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorDetails {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

const ERROR_INFO_TYPE: &str = "type.googleapis.com/google.rpc.ErrorInfo";
const HELP_TYPE: &str = "type.googleapis.com/google.rpc.Help";

impl ApiErrorDetails {
    /// Machine-readable reason code from the first `ErrorInfo` detail.
    pub fn reason(&self) -> Option<&str> {
        self.details_of_type(ERROR_INFO_TYPE)
            .find_map(|d| d.get("reason").and_then(|r| r.as_str()))
    }

    /// All links carried by `Help` details, in order.
    pub fn help_links(&self) -> Vec<HelpLink> {
        self.details_of_type(HELP_TYPE)
            .filter_map(|d| d.get("links"))
            .filter_map(|links| serde_json::from_value::<Vec<HelpLink>>(links.clone()).ok())
            .flatten()
            .collect()
    }

    fn details_of_type<'a>(
        &'a self,
        type_url: &'a str,
    ) -> impl Iterator<Item = &'a serde_json::Value> + 'a {
        self.details
            .iter()
            .filter(move |d| d.get("@type").and_then(|t| t.as_str()) == Some(type_url))
    }
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Some(status) => write!(f, "{} {status}: {}", self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("api error: {0}")]
    Api(ApiErrorDetails),

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("prompt blocked: {reason}")]
    Blocked { reason: String },

    #[error("rate limited")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,
}

impl LlmError {
    /// Structured API details, when the provider returned any.
    pub fn api_details(&self) -> Option<&ApiErrorDetails> {
        match self {
            LlmError::Api(details) => Some(details),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quota_error() -> ApiErrorDetails {
        serde_json::from_value(serde_json::json!({
            "code": 429,
            "message": "Resource has been exhausted (e.g. check quota).",
            "status": "RESOURCE_EXHAUSTED",
            "details": [
                {
                    "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                    "reason": "RATE_LIMIT_EXCEEDED",
                    "domain": "googleapis.com"
                },
                {
                    "@type": "type.googleapis.com/google.rpc.Help",
                    "links": [
                        {
                            "description": "Learn about quotas",
                            "url": "https://ai.google.dev/gemini-api/docs/rate-limits"
                        }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_message_role_display_matches_wire_name() {
        assert_eq!(MessageRole::User.to_string(), "user");
        assert_eq!(MessageRole::Model.to_string(), "model");
    }

    #[test]
    fn test_message_role_serde() {
        let json = serde_json::to_string(&MessageRole::Model).unwrap();
        assert_eq!(json, "\"model\"");
    }

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(StopReason::EndTurn.to_string(), "end_turn");
        assert_eq!(StopReason::MaxTokens.to_string(), "max_tokens");
    }

    #[test]
    fn test_api_error_reason_and_links() {
        let err = quota_error();
        assert_eq!(err.reason(), Some("RATE_LIMIT_EXCEEDED"));
        let links = err.help_links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://ai.google.dev/gemini-api/docs/rate-limits");
        assert_eq!(links[0].description, "Learn about quotas");
    }

    #[test]
    fn test_api_error_without_details() {
        let err = ApiErrorDetails {
            code: 500,
            status: None,
            message: "internal".to_string(),
            details: Vec::new(),
        };
        assert!(err.reason().is_none());
        assert!(err.help_links().is_empty());
        assert_eq!(err.to_string(), "500: internal");
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Api(quota_error());
        assert_eq!(
            err.to_string(),
            "api error: 429 RESOURCE_EXHAUSTED: Resource has been exhausted (e.g. check quota)."
        );
        assert!(err.api_details().is_some());
        assert!(LlmError::RateLimited.api_details().is_none());
    }

    #[test]
    fn test_stream_event_serde_tag() {
        let event = StreamEvent::TextDelta {
            text: "Once".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"text_delta","text":"Once"}"#);
    }
}
