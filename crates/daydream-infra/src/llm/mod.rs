//! LLM provider implementations.
//!
//! Contains concrete implementations of the
//! [`LlmProvider`](daydream_core::llm::provider::LlmProvider) trait defined
//! in `daydream-core`.

pub mod gemini;
