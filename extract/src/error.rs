//! Error types for extraction operations with attempt history tracking.

use std::time::Duration;
use thiserror::Error;

use super::metrics::ExtractionMetrics;

/// How a single model response was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The model returned no text.
    Empty,
    /// The text parsed as JSON.
    Parsed,
    /// The text did not parse; carries the parser message.
    ParseFailed(String),
    /// The text was identical to the previous response.
    Repeated,
}

/// Record of a single extraction attempt.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// The attempt number (1-indexed).
    pub attempt_number: usize,
    /// Trimmed model output.
    pub raw_output: String,
    /// Classification of the output.
    pub outcome: AttemptOutcome,
    /// Elapsed time since the extraction started.
    pub elapsed: Duration,
}

/// Errors that can occur during extraction operations.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The input is missing or not a decodable raster image.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The model call itself failed. Never retried.
    #[error("Model call failed at attempt {attempt}: {message}")]
    TransportFailure {
        /// Attempt number where the call failed.
        attempt: usize,
        /// Error reported by the model backend.
        message: String,
    },

    /// Model output did not parse as JSON. Transient: the retry loop absorbs it.
    #[error("JSON parsing failed: {message}")]
    ParseFailure {
        /// Parser error message.
        message: String,
        /// Text that failed to parse.
        raw_text: String,
    },

    /// The attempt budget ran out, or the model repeated itself, without a
    /// parseable response.
    #[error("Failed to get a valid response from the model after {attempts} attempts (max: {max_attempts})")]
    ExhaustedRetries {
        /// Number of attempts made.
        attempts: usize,
        /// Maximum attempts allowed.
        max_attempts: usize,
        /// Whether the loop stopped early on a repeated response.
        converged: bool,
        /// History of all attempts.
        history: Vec<AttemptRecord>,
        /// Metrics tracked across all attempts.
        metrics: ExtractionMetrics,
    },

    /// The response parsed but required fields are missing or invalid.
    #[error("Missing expected keys in model response: {}", problems.join("; "))]
    IncompleteFields {
        /// One message per missing or invalid field.
        problems: Vec<String>,
        /// The parsed response.
        response: serde_json::Value,
    },

    /// The field schema failed to compile.
    #[error("Schema error: {0}")]
    Schema(String),
}

impl ExtractionError {
    /// Whether the retry loop treats this error as an inconclusive attempt.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::ParseFailure { .. })
    }
}
