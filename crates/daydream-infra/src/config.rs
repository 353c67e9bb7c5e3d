//! Configuration loader for Daydream.
//!
//! Reads an optional `config.toml` and deserializes it into
//! [`DaydreamConfig`]. Falls back to defaults when the file is missing or
//! malformed.

use std::path::{Path, PathBuf};

use daydream_types::config::DaydreamConfig;

/// Default location: `{config_dir}/daydream/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("daydream").join("config.toml"))
}

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`DaydreamConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(path: &Path) -> DaydreamConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return DaydreamConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return DaydreamConfig::default();
        }
    };

    match toml::from_str::<DaydreamConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            DaydreamConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).await;
        assert!(config.model.is_none());
        assert_eq!(config.timing.character_ms, 30);
        assert_eq!(config.timing.sentence_ms, 300);
        assert_eq!(config.timing.wrap_column, 80);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(
            &path,
            r#"
model = "gemini-1.5-flash"
base_url = "http://localhost:8080"

[timing]
character_ms = 5
sentence_ms = 50
wrap_column = 60
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.model.as_deref(), Some("gemini-1.5-flash"));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        let policy = config.timing.policy();
        assert_eq!(policy.character, Duration::from_millis(5));
        assert_eq!(policy.sentence, Duration::from_millis(50));
        assert_eq!(policy.wrap_column, 60);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(&path).await;
        assert!(config.model.is_none());
        assert_eq!(config.timing.sentence_ms, 300);
    }

    #[test]
    fn default_config_path_ends_with_app_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("daydream/config.toml"));
        }
    }
}
