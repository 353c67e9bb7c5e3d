//! Shared domain types for Daydream.
//!
//! Conversation turns, streaming events, provider errors with their
//! structured diagnostics, configuration shapes and the startup error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod llm;
