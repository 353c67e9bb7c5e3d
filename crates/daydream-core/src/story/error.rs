use thiserror::Error;

use daydream_types::llm::LlmError;

/// Errors that end a story session.
///
/// None of these are retried; the binary maps each one to an exit status.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("standard input closed")]
    InputClosed,

    #[error("error reading input: {0}")]
    Input(#[source] std::io::Error),

    #[error("error writing output: {0}")]
    Output(#[source] std::io::Error),

    #[error("error sending message: {0}")]
    Stream(#[from] LlmError),

    #[error("session cancelled")]
    Cancelled,
}
