//! Request pipeline: image bytes in, cost breakdown out.

use std::sync::Arc;

use buildsmart_core::{estimate, CostBreakdown, CostSchedule, QuantityRecord};
use buildsmart_extract::{ExtractionClient, ExtractionError, ExtractionMetrics, FloorPlanImage, VisionModel};
use serde::Serialize;

use crate::config::AppConfig;
use crate::errors::Error;
use crate::gemini::GeminiVision;
use crate::response::AnalysisResponse;

/// Result of analyzing one floor plan.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Quantities read from the plan.
    pub quantities: QuantityRecord,
    /// Cost and material estimate.
    pub breakdown: CostBreakdown,
    /// Extraction metrics.
    #[serde(skip)]
    pub metrics: ExtractionMetrics,
}

/// Stateless request handler shared across requests.
#[derive(Debug, Clone)]
pub struct Analyzer {
    extractor: ExtractionClient,
    schedule: Arc<CostSchedule>,
}

impl Analyzer {
    /// Creates an analyzer from an extraction client and a schedule.
    ///
    /// # Errors
    ///
    /// Returns `Error::Schedule` if the schedule fails validation.
    pub fn new(extractor: ExtractionClient, schedule: CostSchedule) -> Result<Self, Error> {
        schedule.validate()?;
        Ok(Self {
            extractor,
            schedule: Arc::new(schedule),
        })
    }

    /// Creates an analyzer around any vision model.
    ///
    /// # Errors
    ///
    /// Returns `Error::Schedule` if the configured schedule fails validation.
    pub fn with_model(model: Arc<dyn VisionModel>, config: AppConfig) -> Result<Self, Error> {
        Self::new(
            ExtractionClient::with_config(model, config.extraction),
            config.schedule,
        )
    }

    /// Creates an analyzer backed by Gemini.
    ///
    /// # Errors
    ///
    /// Returns `Error::Gemini` if the backend cannot be set up, or
    /// `Error::Schedule` if the schedule is invalid.
    pub fn from_config(config: AppConfig) -> Result<Self, Error> {
        let model = GeminiVision::new(&config.gemini)?;
        Self::with_model(Arc::new(model), config)
    }

    /// Schedule used for estimates.
    #[must_use]
    pub fn schedule(&self) -> &CostSchedule {
        &self.schedule
    }

    /// Analyzes one uploaded image.
    ///
    /// `None` stands for a request without an image.
    ///
    /// # Errors
    ///
    /// Returns `Error::Extraction` for a missing or unreadable image, a failed
    /// model call, an exhausted retry budget, or a response with missing
    /// fields. No estimate is computed in any of those cases.
    pub async fn analyze(&self, upload: Option<Vec<u8>>) -> Result<Analysis, Error> {
        let bytes = upload.ok_or_else(|| {
            ExtractionError::InvalidImage("No image file provided".to_string())
        })?;
        let image = FloorPlanImage::decode(bytes)?;
        tracing::info!(
            mime_type = image.mime_type(),
            width = image.width(),
            height = image.height(),
            "Image received"
        );

        let extraction = self.extractor.extract(&image).await?;
        let breakdown = estimate(&extraction.record, &self.schedule);

        Ok(Analysis {
            quantities: extraction.record,
            breakdown,
            metrics: extraction.metrics,
        })
    }

    /// Analyzes one uploaded image and renders the status and JSON body.
    pub async fn respond(&self, upload: Option<Vec<u8>>) -> AnalysisResponse {
        let result = self.analyze(upload).await;
        if let Err(err) = &result {
            tracing::error!(error = %err, status = err.status_code(), "Analysis failed");
        }
        AnalysisResponse::from_result(&result)
    }

    /// Estimates directly from known quantities, bypassing the model.
    #[must_use]
    pub fn estimate(&self, quantities: &QuantityRecord) -> CostBreakdown {
        estimate(quantities, &self.schedule)
    }
}
