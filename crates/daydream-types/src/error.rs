use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling a story session at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "environment variable {var} is not set. To obtain an API key, visit \
         https://aistudio.google.com/, select 'Get API key'."
    )]
    MissingCredential { var: String },

    #[error("error reading system instructions {}: {source}", path.display())]
    InstructionFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
