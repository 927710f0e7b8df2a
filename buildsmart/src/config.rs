//! Application configuration, assembled once at startup.

use std::path::Path;

use buildsmart_core::CostSchedule;
use buildsmart_extract::ExtractionConfig;
use buildsmart_gemini::GenerateConfig;

use crate::errors::Error;

/// Settings for the Gemini backend.
#[derive(Debug, Clone, Default)]
pub struct GeminiSettings {
    /// API key override (None = `GEMINI_API_KEY` / `GOOGLE_API_KEY`).
    pub api_key: Option<String>,
    /// Model, endpoint, temperature and timeout.
    pub generate: GenerateConfig,
}

/// Everything an [`Analyzer`](crate::pipeline::Analyzer) needs.
///
/// The cost schedule is injected here rather than baked into the pipeline, so
/// deployments can price against their own tables.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Vision model backend.
    pub gemini: GeminiSettings,
    /// Retry budget, pause and prompt.
    pub extraction: ExtractionConfig,
    /// Baseline cost schedule.
    pub schedule: CostSchedule,
}

impl AppConfig {
    /// Create a new `AppConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the schedule with one loaded from a JSON file, if given.
    ///
    /// # Errors
    ///
    /// Returns `Error::Schedule` if the file cannot be read, parsed or
    /// validated.
    pub fn with_schedule_file(mut self, path: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = path {
            self.schedule = CostSchedule::from_json_file(path)?;
            tracing::info!(path = %path.display(), "Loaded cost schedule");
        }
        Ok(self)
    }
}
