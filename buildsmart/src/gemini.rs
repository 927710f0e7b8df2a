//! Gemini-backed [`VisionModel`].

use async_trait::async_trait;
use buildsmart_extract::{FloorPlanImage, VisionModel};
use buildsmart_gemini::{GeminiClient, InlineImage};

use crate::config::GeminiSettings;
use crate::errors::Error;

/// Vision model backed by the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiVision {
    client: GeminiClient,
}

impl GeminiVision {
    /// Resolves the API key and prepares the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `Error::Gemini` if no API key is available or the settings are
    /// invalid.
    pub fn new(settings: &GeminiSettings) -> Result<Self, Error> {
        let client = GeminiClient::new(settings.api_key.clone(), settings.generate.clone())?;
        tracing::info!(model = %client.config().model, "Gemini vision model ready");
        Ok(Self { client })
    }
}

#[async_trait]
impl VisionModel for GeminiVision {
    async fn generate(&self, image: &FloorPlanImage, prompt: &str) -> Result<String, String> {
        let inline = InlineImage {
            mime_type: image.mime_type(),
            data: image.bytes(),
        };

        let result = self
            .client
            .generate(prompt, &inline)
            .await
            .map_err(|e| e.to_string())?;

        if result.text.trim().is_empty() {
            tracing::warn!(
                finish_reason = ?result.finish_reason,
                "Gemini returned no text"
            );
        }

        Ok(result.text)
    }
}
