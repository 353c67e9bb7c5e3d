//! GeminiProvider -- concrete [`LlmProvider`] implementation for Google Gemini.
//!
//! Sends requests to `v1beta/models/{model}:streamGenerateContent?alt=sse`
//! with the `x-goog-api-key` header.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use secrecy::SecretString;

use daydream_core::llm::provider::{EventStream, LlmProvider};
use daydream_types::llm::{CompletionRequest, LlmError};

use super::streaming::create_gemini_stream;
use super::types::{GeminiContent, GeminiRequest};

/// Google Gemini LLM provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    /// Create a new Gemini provider.
    ///
    /// No request timeout is set: a story reply streams for as long as the
    /// model keeps writing.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "gemini-1.5-pro-latest")
    pub fn new(api_key: SecretString, model: String) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Streaming endpoint for `model`.
    fn stream_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{model}:streamGenerateContent?alt=sse",
            self.base_url
        )
    }

    /// Convert a generic [`CompletionRequest`] into a [`GeminiRequest`].
    ///
    /// History keeps its order; the role names are already Gemini's.
    fn to_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| GeminiContent::text(Some(&m.role.to_string()), m.content.clone()))
            .collect();

        GeminiRequest {
            system_instruction: request
                .system
                .as_ref()
                .map(|system| GeminiContent::text(None, system.clone())),
            contents,
        }
    }
}

// GeminiProvider does not derive Debug; the key stays out of every format path.

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn stream(&self, request: CompletionRequest) -> EventStream {
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };
        let url = self.stream_url(model);
        let body = Self::to_gemini_request(&request);

        tracing::debug!(
            model = %model,
            contents = body.contents.len(),
            "opening gemini stream"
        );

        create_gemini_stream(&self.client, &url, body, &self.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daydream_types::llm::Message;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(
            SecretString::from("test-key-not-real".to_string()),
            "gemini-1.5-pro-latest".to_string(),
        )
        .unwrap()
    }

    fn request(model: &str, messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages,
            system: Some("You narrate dreams.".to_string()),
        }
    }

    #[test]
    fn test_provider_identity() {
        let p = provider();
        assert_eq!(p.name(), "gemini");
        assert_eq!(p.model(), "gemini-1.5-pro-latest");
    }

    #[test]
    fn test_stream_url() {
        let p = provider();
        assert_eq!(
            p.stream_url("gemini-1.5-pro-latest"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro-latest:streamGenerateContent?alt=sse"
        );

        let p = provider().with_base_url("http://localhost:8080/");
        assert_eq!(
            p.stream_url("m"),
            "http://localhost:8080/v1beta/models/m:streamGenerateContent?alt=sse"
        );
    }

    #[test]
    fn test_request_mapping_keeps_history_order() {
        let req = request(
            "",
            vec![
                Message::model("What do you want to dream about?"),
                Message::user("a forest of glass trees"),
            ],
        );
        let body = GeminiProvider::to_gemini_request(&req);

        assert_eq!(
            body.system_instruction,
            Some(GeminiContent::text(None, "You narrate dreams."))
        );
        assert_eq!(body.contents.len(), 2);
        assert_eq!(body.contents[0].role.as_deref(), Some("model"));
        assert_eq!(body.contents[1].role.as_deref(), Some("user"));
        assert_eq!(
            body.contents[1].parts[0].text.as_deref(),
            Some("a forest of glass trees")
        );
    }

    #[test]
    fn test_request_without_system_instruction() {
        let mut req = request("", vec![Message::user("fly")]);
        req.system = None;
        let body = GeminiProvider::to_gemini_request(&req);

        assert!(body.system_instruction.is_none());
        assert_eq!(body.contents, vec![GeminiContent::text(Some("user"), "fly")]);
    }
}
