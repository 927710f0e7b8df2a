//! # buildsmart
//!
//! Construction cost and material estimates from 2D floor-plan images.
//!
//! An uploaded image goes to a vision model that reads off the built-up area
//! and the door and window counts; a baseline cost schedule is then scaled to
//! that area.
//!
//! ## Example
//!
//! ```no_run
//! # use buildsmart::prelude::*;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = Analyzer::from_config(AppConfig::default())?;
//!
//! let bytes = std::fs::read("plan.png")?;
//! let analysis = analyzer.analyze(Some(bytes)).await?;
//! println!("{}", serde_json::to_string_pretty(&analysis.breakdown)?);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

/// Application configuration.
pub mod config;

/// Public error types.
pub mod errors;

/// Gemini-backed vision model.
pub mod gemini;

/// Request pipeline from image bytes to cost breakdown.
pub mod pipeline;

/// Response bodies and status codes for the request boundary.
pub mod response;

/// Commonly used types.
pub mod prelude;
