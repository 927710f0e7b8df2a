//! Bounded-retry extraction of floor-plan quantities from a vision model.
//!
//! This crate turns an unreliable free-text model into structured
//! [`QuantityRecord`](buildsmart_core::QuantityRecord)s:
//!
//! - [`FloorPlanImage`] - Rejects empty or undecodable uploads up front
//! - [`ExtractionClient`] - Async retry loop around an injected [`VisionModel`]
//! - [`RetryLoop`] - The explicit state machine behind the loop
//! - [`ExtractionError`] - Typed error enum with attempt history
//! - [`ExtractionMetrics`] - Attempt, timing and token metrics
//! - [`ExtractionConfig`] - Attempt budget, pause and prompt

pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod intake;
pub mod metrics;
pub mod model;
pub mod parse;
pub mod prompt;
pub mod state;

pub use client::{Extraction, ExtractionClient};
pub use config::ExtractionConfig;
pub use error::{AttemptOutcome, AttemptRecord, ExtractionError};
pub use fields::quantities_from_value;
pub use intake::FloorPlanImage;
pub use metrics::{estimate_tokens, ExtractionMetrics};
pub use model::VisionModel;
pub use state::{AttemptState, RetryLoop};

/// Common imports for driving an extraction.
pub mod prelude {
    pub use crate::client::{Extraction, ExtractionClient};
    pub use crate::config::ExtractionConfig;
    pub use crate::error::ExtractionError;
    pub use crate::intake::FloorPlanImage;
    pub use crate::model::VisionModel;
}
