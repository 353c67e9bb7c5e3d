//! Filesystem access for story assets.

use std::path::Path;

use daydream_types::error::ConfigError;

/// Default system-instruction file, relative to the working directory.
pub const SYSTEM_INSTRUCTIONS_FILE: &str = "system-instructions.md";

/// Read the system instructions once, as raw bytes.
///
/// Invalid UTF-8 is replaced rather than rejected; the text only ever goes
/// to the model.
pub async fn load_system_instructions(path: &Path) -> Result<String, ConfigError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ConfigError::InstructionFile {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded system instructions");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn loads_instruction_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(SYSTEM_INSTRUCTIONS_FILE);
        tokio::fs::write(&path, "You narrate dreams in second person.\n")
            .await
            .unwrap();

        let text = load_system_instructions(&path).await.unwrap();
        assert_eq!(text, "You narrate dreams in second person.\n");
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(SYSTEM_INSTRUCTIONS_FILE);
        tokio::fs::write(&path, b"dream\xFFer").await.unwrap();

        let text = load_system_instructions(&path).await.unwrap();
        assert_eq!(text, "dream\u{FFFD}er");
    }

    #[tokio::test]
    async fn missing_file_is_a_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.md");

        let err = load_system_instructions(&path).await.unwrap_err();
        match err {
            ConfigError::InstructionFile { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected InstructionFile, got: {other}"),
        }
    }
}
