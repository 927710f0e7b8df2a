//! Common imports for buildsmart usage.
//!
//! ```
//! use buildsmart::prelude::*;
//! ```

pub use crate::config::{AppConfig, GeminiSettings};
pub use crate::errors::Error;
pub use crate::gemini::GeminiVision;
pub use crate::pipeline::{Analysis, Analyzer};
pub use crate::response::{AnalysisResponse, ErrorPayload};

// Domain and extraction types most callers need alongside the analyzer
pub use buildsmart_core::{CostBreakdown, CostSchedule, QuantityRecord};
pub use buildsmart_extract::{ExtractionConfig, ExtractionError, FloorPlanImage, VisionModel};
