//! Shared data types for Gemini adapter configuration and results.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::GeminiError;

/// Default public endpoint for the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default vision-capable model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for `generateContent` calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Model name (e.g. `"gemini-1.5-flash"`).
    pub model: String,
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// Sampling temperature; `None` keeps the model default.
    pub temperature: Option<f32>,
    /// Maximum wall-clock duration of one request.
    pub timeout: Duration,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl GenerateConfig {
    /// Rejects configurations that cannot produce a valid request.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::InvalidConfig` for a blank model or base URL, a
    /// zero timeout, or a temperature outside `0.0..=2.0`.
    pub fn validate(&self) -> Result<(), GeminiError> {
        if self.model.trim().is_empty() {
            return Err(GeminiError::InvalidConfig("model name is empty".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(GeminiError::InvalidConfig("base URL is empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(GeminiError::InvalidConfig("timeout must be non-zero".to_string()));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(GeminiError::InvalidConfig(format!(
                    "temperature {t} is outside 0.0..=2.0"
                )));
            }
        }
        Ok(())
    }

    /// Full `generateContent` URL for the configured model.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Image bytes sent inline with a request.
#[derive(Debug, Clone, Copy)]
pub struct InlineImage<'a> {
    /// IANA media type, e.g. `image/png`.
    pub mime_type: &'a str,
    /// Raw encoded image bytes.
    pub data: &'a [u8],
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the prompt, image included.
    #[serde(default)]
    pub prompt_token_count: u32,
    /// Tokens across generated candidates.
    #[serde(default)]
    pub candidates_token_count: u32,
    /// Sum reported by the API.
    #[serde(default)]
    pub total_token_count: u32,
}

/// Result of a completed `generateContent` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResult {
    /// Concatenated text of the first candidate; empty if there was none.
    pub text: String,
    /// Finish reason of the first candidate, if reported.
    pub finish_reason: Option<String>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Token usage, if reported.
    pub usage: Option<UsageMetadata>,
}

/// Response envelope of `generateContent`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Token usage.
    pub usage_metadata: Option<UsageMetadata>,
}

/// One generated candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content; absent when generation was blocked.
    pub content: Option<Content>,
    /// Why generation stopped (`STOP`, `SAFETY`, ...).
    pub finish_reason: Option<String>,
}

/// Content of a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    /// Content parts; only text parts are read.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single content part.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    /// Text of the part, if it is a text part.
    pub text: Option<String>,
}
