//! Extraction client: drives the retry loop against a [`VisionModel`].

use std::sync::Arc;

use buildsmart_core::QuantityRecord;
use tokio::time::{sleep, Instant};
use tracing::Instrument;

use crate::config::ExtractionConfig;
use crate::error::ExtractionError;
use crate::fields::quantities_from_value;
use crate::intake::FloorPlanImage;
use crate::metrics::ExtractionMetrics;
use crate::model::VisionModel;
use crate::state::{AttemptState, RetryLoop};

/// Quantities extracted from one floor plan, with the cost of getting them.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Validated quantities.
    pub record: QuantityRecord,
    /// Attempt and timing metrics.
    pub metrics: ExtractionMetrics,
}

/// Client that asks a vision model for floor-plan quantities.
///
/// Holds no per-request state; one client can serve concurrent requests.
#[derive(Clone)]
pub struct ExtractionClient {
    model: Arc<dyn VisionModel>,
    config: ExtractionConfig,
}

impl std::fmt::Debug for ExtractionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ExtractionClient {
    /// Creates a client with the default configuration.
    #[must_use]
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self::with_config(model, ExtractionConfig::default())
    }

    /// Creates a client with the given configuration.
    #[must_use]
    pub fn with_config(model: Arc<dyn VisionModel>, config: ExtractionConfig) -> Self {
        Self { model, config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Runs the bounded retry loop for one image.
    ///
    /// Each attempt sends the image and the configured prompt. Unparseable or
    /// empty responses are retried after `retry_delay`; a response identical to
    /// the previous one stops the loop early. The first parseable response is
    /// validated and returned.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::TransportFailure` as soon as a model call
    /// fails, `ExtractionError::IncompleteFields` if the parsed response lacks
    /// valid quantities, and `ExtractionError::ExhaustedRetries` if no
    /// response parsed.
    pub async fn extract(&self, image: &FloorPlanImage) -> Result<Extraction, ExtractionError> {
        let start = Instant::now();
        let prompt = self.config.prompt.as_str();
        let mut machine = RetryLoop::new(self.config.max_attempts);
        let mut metrics = ExtractionMetrics::default();

        while !machine.state().is_terminal() {
            let attempt = machine.attempts() + 1;
            let raw = self
                .model
                .generate(image, prompt)
                .instrument(tracing::info_span!(
                    "extraction_attempt",
                    attempt,
                    max_attempts = self.config.max_attempts
                ))
                .await
                .map_err(|message| {
                    tracing::error!(attempt, error = %message, "Model call failed");
                    ExtractionError::TransportFailure { attempt, message }
                })?;
            metrics.record_call(prompt, image.bytes().len(), &raw);

            let state = machine.observe(&raw, start.elapsed()).clone();
            match state {
                AttemptState::ParsedOk(value) => {
                    let record = quantities_from_value(&value)?;
                    metrics.wall_time = start.elapsed();
                    tracing::info!(
                        attempts = metrics.total_attempts,
                        area_sq_ft = record.built_up_area_sq_ft(),
                        doors = record.door_count(),
                        windows = record.window_count(),
                        elapsed_ms = %metrics.wall_time.as_millis(),
                        estimated_tokens = metrics.estimated_total_tokens(),
                        "Extracted floor plan quantities"
                    );
                    return Ok(Extraction { record, metrics });
                }
                AttemptState::ParseFailed => {
                    tracing::warn!(
                        attempt,
                        delay_ms = %self.config.retry_delay.as_millis(),
                        "Model response was not valid JSON; retrying"
                    );
                    sleep(self.config.retry_delay).await;
                }
                AttemptState::Stable => {
                    tracing::warn!(attempt, "Model repeated its previous response; stopping");
                }
                AttemptState::Exhausted | AttemptState::Pending => {}
            }
        }

        let attempts = machine.attempts();
        let converged = machine.state() == &AttemptState::Stable;
        metrics.wall_time = start.elapsed();
        tracing::error!(
            attempts,
            converged,
            estimated_tokens = metrics.estimated_total_tokens(),
            "No usable model response"
        );

        Err(ExtractionError::ExhaustedRetries {
            attempts,
            max_attempts: machine.max_attempts(),
            converged,
            history: machine.into_history(),
            metrics,
        })
    }
}
