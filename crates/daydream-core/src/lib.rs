//! Story logic and provider trait definitions for Daydream.
//!
//! This crate defines the `LlmProvider` port that the infrastructure layer
//! implements, plus the typewriter renderer and the conversation driver. It
//! depends only on `daydream-types` -- never on `daydream-infra` or any
//! network crate.

pub mod llm;
pub mod story;
