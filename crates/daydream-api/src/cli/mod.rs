//! CLI argument definitions for the `daydream` binary.
//!
//! Uses clap derive macros for argument parsing. There are no subcommands:
//! running the binary starts a story.

pub mod story;

use std::path::PathBuf;

use clap::Parser;

/// Dream up an interactive story, one paragraph at a time.
#[derive(Parser)]
#[command(name = "daydream", version, about, long_about = None)]
pub struct Cli {
    /// Gemini API key.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// File holding the system instructions sent with every request.
    #[arg(long, default_value = "system-instructions.md")]
    pub system_instructions: PathBuf,

    /// Model identifier [default: gemini-1.5-pro-latest].
    #[arg(long)]
    pub model: Option<String>,

    /// Optional TOML config file (defaults to the user config directory).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Export tracing spans through OpenTelemetry.
    #[arg(long)]
    pub otel: bool,

    /// Suppress all log output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed logs on stderr (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default `EnvFilter` directive for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,daydream=debug",
            _ => "trace",
        }
    }
}
