//! Domain model and cost estimator for floor-plan construction estimates.
//!
//! This crate is pure: it performs no I/O beyond optional schedule loading and
//! holds no shared state. The extraction side of the system produces a
//! [`QuantityRecord`]; [`estimate`] turns it into a [`CostBreakdown`] using a
//! [`CostSchedule`].

/// Cost breakdown types produced by the estimator.
pub mod breakdown;
/// Error types for quantity construction and schedule loading.
pub mod error;
/// The cost and material estimator.
pub mod estimator;
/// Structural quantities extracted from a floor plan.
pub mod quantity;
/// Baseline cost schedules.
pub mod schedule;

pub use breakdown::{ConstructionStageCost, CostBreakdown, CostRange, MaterialQuantities, StageCost};
pub use error::{QuantityError, ScheduleError};
pub use estimator::{estimate, estimate_with, MaterialConstants};
pub use quantity::{QuantityRecord, MAX_BUILT_UP_AREA_SQ_FT};
pub use schedule::{CostSchedule, ExpenditureRange, StageSchedule};
