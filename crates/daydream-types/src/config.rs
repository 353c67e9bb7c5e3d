//! Configuration types for Daydream.
//!
//! `DaydreamConfig` represents the optional `config.toml`. Every field has a
//! default, so a missing file and an empty file behave the same.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Model used when neither the CLI nor the config file names one.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaydreamConfig {
    /// Model identifier override.
    #[serde(default)]
    pub model: Option<String>,

    /// Override the provider base URL (useful for proxies).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Typewriter pacing.
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Pacing settings as written in `config.toml`, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_character_ms")]
    pub character_ms: u64,

    #[serde(default = "default_sentence_ms")]
    pub sentence_ms: u64,

    #[serde(default = "default_wrap_column")]
    pub wrap_column: usize,
}

fn default_character_ms() -> u64 {
    30
}

fn default_sentence_ms() -> u64 {
    300
}

fn default_wrap_column() -> usize {
    80
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            character_ms: default_character_ms(),
            sentence_ms: default_sentence_ms(),
            wrap_column: default_wrap_column(),
        }
    }
}

impl TimingConfig {
    pub fn policy(&self) -> TimingPolicy {
        TimingPolicy {
            character: Duration::from_millis(self.character_ms),
            sentence: Duration::from_millis(self.sentence_ms),
            wrap_column: self.wrap_column,
        }
    }
}

/// Immutable pacing policy consumed by the typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingPolicy {
    /// Pause after every character.
    pub character: Duration,
    /// Extra pause after a '.'.
    pub sentence: Duration,
    /// A space seen past this column becomes a line break.
    pub wrap_column: usize,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        TimingConfig::default().policy()
    }
}
