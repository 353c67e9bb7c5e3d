//! LlmProvider trait definition.
//!
//! This is the core abstraction that all LLM providers implement. `stream`
//! returns `Pin<Box<dyn Stream>>` so the trait stays object-safe and the
//! stream can outlive the borrow of the provider.

use std::pin::Pin;

use futures_util::Stream;

use daydream_types::llm::{CompletionRequest, LlmError, StreamEvent};

/// Boxed stream of provider events. Finite and not restartable.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for LLM provider backends.
///
/// Implementations live in daydream-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// The model used when a request leaves `model` empty.
    fn model(&self) -> &str;

    /// Send a streaming completion request. Returns a stream of events.
    ///
    /// Transport failures surface as the first `Err` item of the stream
    /// rather than from this call.
    fn stream(&self, request: CompletionRequest) -> EventStream;
}
