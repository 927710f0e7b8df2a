//! Public error types for buildsmart.

use buildsmart_core::{QuantityError, ScheduleError};
use buildsmart_extract::ExtractionError;
use buildsmart_gemini::GeminiError;
use thiserror::Error;

/// Errors that can occur while analyzing a floor plan.
///
/// Every variant maps to a status code and an `{"error": ...}` payload via
/// [`Error::status_code`] and [`ErrorPayload`](crate::response::ErrorPayload);
/// none of them is fatal to the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Extraction failed: bad image, model failure, or unusable response.
    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    /// Quantities supplied directly were invalid.
    #[error("{0}")]
    Quantity(#[from] QuantityError),

    /// The Gemini backend could not be set up.
    #[error("Gemini setup failed: {0}")]
    Gemini(#[from] GeminiError),

    /// The cost schedule could not be loaded.
    #[error("Cost schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Configuration error (invalid settings or options).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP-style status for this error: 4xx for caller mistakes, 5xx otherwise.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Extraction(ExtractionError::InvalidImage(_)) | Self::Quantity(_) => 400,
            Self::Extraction(ExtractionError::TransportFailure { .. }) => 502,
            _ => 500,
        }
    }
}
