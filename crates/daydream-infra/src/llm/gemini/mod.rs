//! Google Gemini LLM provider implementation.
//!
//! This module provides the [`GeminiProvider`] which implements the
//! [`LlmProvider`](daydream_core::llm::provider::LlmProvider) trait for the
//! Gemini `streamGenerateContent` API over server-sent events.

pub mod client;
pub mod streaming;
pub mod types;

pub use client::GeminiProvider;
