//! Discovery and resolution of the Gemini API key.

use crate::error::GeminiError;

/// Primary environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Environment variable consulted when [`API_KEY_ENV_VAR`] is unset.
pub const FALLBACK_API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";

/// Locates the API key.
///
/// Resolution order:
/// 1. `explicit_key` if provided and non-blank.
/// 2. The `GEMINI_API_KEY` environment variable.
/// 3. The `GOOGLE_API_KEY` environment variable.
///
/// # Errors
///
/// Returns `GeminiError::MissingApiKey` when no non-blank key is found.
pub fn discover_api_key(explicit_key: Option<String>) -> Result<String, GeminiError> {
    resolve_api_key(explicit_key, |name| std::env::var(name).ok())
}

fn resolve_api_key(
    explicit_key: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, GeminiError> {
    if let Some(key) = explicit_key {
        let key = key.trim();
        if key.is_empty() {
            return Err(GeminiError::MissingApiKey(
                "explicit API key is blank".to_string(),
            ));
        }
        return Ok(key.to_string());
    }

    [API_KEY_ENV_VAR, FALLBACK_API_KEY_ENV_VAR]
        .iter()
        .filter_map(|name| lookup(name))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or_else(|| {
            GeminiError::MissingApiKey(format!(
                "set {API_KEY_ENV_VAR} or {FALLBACK_API_KEY_ENV_VAR}"
            ))
        })
}
