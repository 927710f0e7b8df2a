use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Scaled cost of a single stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCost {
    /// Stage total for the measured area.
    pub total: f64,
    /// Line items for the measured area.
    pub details: BTreeMap<String, f64>,
}

/// Material quantities for the construction stage.
///
/// Bulk materials are whole purchase units; coatings are fractional and may
/// be negative when door and window openings exceed the wall surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialQuantities {
    /// Cement, bags.
    pub cement_needed: u64,
    /// Sand, units.
    pub sand_needed: u64,
    /// Stone aggregate, units.
    pub aggregate_needed: u64,
    /// Reinforcement steel, kg.
    pub steel_needed: u64,
    /// Paint, litres.
    pub paint_needed: f64,
    /// Primer, litres.
    pub primer_needed: f64,
    /// Wall putty, kg.
    pub putty_needed: f64,
}

/// Construction stage cost together with its material quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionStageCost {
    /// Scaled total and line items.
    #[serde(flatten)]
    pub cost: StageCost,
    /// Material quantities.
    pub materials: MaterialQuantities,
}

/// Total expenditure range for the measured area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

/// Full estimate for one floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Pre-construction stage.
    pub pre_construction_stage: StageCost,
    /// Construction stage, including materials.
    pub construction_stage: ConstructionStageCost,
    /// Post-construction stage.
    pub post_construction_stage: StageCost,
    /// Total expenditure range.
    pub total_cost_estimation: CostRange,
}
