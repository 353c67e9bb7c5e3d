//! Infrastructure implementations for Daydream.
//!
//! Concrete `LlmProvider`s, config file loading, credential resolution and
//! filesystem access for the system instructions.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
