//! Rust adapter for the Gemini `generateContent` endpoint.
//!
//! This crate provides API key discovery, request construction with inline
//! image parts, and execution with a wall-clock timeout. It knows nothing about
//! floor plans: callers supply the prompt and the image.

/// Request body construction and response text extraction.
pub mod body;
/// Discovery and resolution of the API key.
pub mod discovery;
/// Error types returned by adapter operations.
pub mod error;
/// HTTP execution with timeouts.
pub mod request;
/// Shared data types for configuration, requests and results.
pub mod types;

pub use discovery::{discover_api_key, API_KEY_ENV_VAR, FALLBACK_API_KEY_ENV_VAR};
pub use error::GeminiError;
pub use request::run_generate;
pub use types::*;

/// High-level client for the Gemini API.
///
/// Holds a pooled HTTP client, so clones are cheap and share connections.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    config: GenerateConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"<redacted>")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client, resolving the API key from `explicit_key` or the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::MissingApiKey` if no key can be found,
    /// `GeminiError::InvalidConfig` if the configuration is unusable, or
    /// `GeminiError::Http` if the HTTP client cannot be built.
    pub fn new(explicit_key: Option<String>, config: GenerateConfig) -> Result<Self, GeminiError> {
        let api_key = discover_api_key(explicit_key)?;
        config.validate()?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            api_key,
            config,
        })
    }

    /// Model configuration used for every request.
    #[must_use]
    pub const fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Sends the image and prompt and returns the model's text.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError` on network failure, timeout, non-success status
    /// or an undecodable response envelope.
    pub async fn generate(
        &self,
        prompt: &str,
        image: &InlineImage<'_>,
    ) -> Result<GenerateResult, GeminiError> {
        run_generate(&self.http, &self.api_key, prompt, image, &self.config).await
    }
}
