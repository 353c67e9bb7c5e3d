//! LLM provider abstractions for Daydream.
//!
//! - `LlmProvider`: the trait concrete providers implement
//! - `StreamInSpan`: keeps a tracing span entered for the life of a stream

pub mod instrumented;
pub mod provider;
