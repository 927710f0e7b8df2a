use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when building a [`QuantityRecord`](crate::QuantityRecord).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuantityError {
    #[error("Built-up area must be a finite number greater than zero, got {0}")]
    InvalidArea(f64),

    #[error("Built-up area {area} exceeds the supported maximum of {max} sq. ft.")]
    AreaTooLarge { area: f64, max: f64 },
}

/// Errors raised while loading or validating a [`CostSchedule`](crate::CostSchedule).
///
/// These are deployment-time defects: a schedule that fails validation must be
/// rejected at startup, before any request is served.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Failed to read schedule file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schedule JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Reference area must be a finite number greater than zero, got {0}")]
    InvalidReferenceArea(f64),

    #[error("Schedule amount `{field}` must be a finite, non-negative number, got {value}")]
    InvalidAmount { field: String, value: f64 },

    #[error("Total expenditure range is inverted: min {min} > max {max}")]
    InvertedRange { min: f64, max: f64 },
}
