//! API credential resolution.

use secrecy::SecretString;

use daydream_types::error::ConfigError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// Wrap the API key, rejecting a missing or blank value.
///
/// The CLI layer reads [`API_KEY_ENV`] (or `--api-key`) and passes the raw
/// value here; the key is never logged.
pub fn resolve_api_key(value: Option<String>) -> Result<SecretString, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(SecretString::from(key)),
        _ => Err(ConfigError::MissingCredential {
            var: API_KEY_ENV.to_string(),
        }),
    }
}
