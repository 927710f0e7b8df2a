//! Cost and material estimator.
//!
//! Stage amounts scale by `area / areaUnderConstruction`. Material formulas
//! and the total expenditure range use the raw area.

use crate::breakdown::{ConstructionStageCost, CostBreakdown, CostRange, MaterialQuantities, StageCost};
use crate::quantity::QuantityRecord;
use crate::schedule::{CostSchedule, StageSchedule};

/// Physical constants behind the material formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialConstants {
    /// Average door height, ft.
    pub door_height_ft: f64,
    /// Average door width, ft.
    pub door_width_ft: f64,
    /// Average window height, ft.
    pub window_height_ft: f64,
    /// Average window width, ft.
    pub window_width_ft: f64,
    /// Wall surface area per unit of floor area.
    pub wall_to_floor_ratio: f64,
    /// Paintable area covered per unit of paint (and of primer).
    pub paint_coverage_sq_ft: f64,
    /// Paintable area covered per unit of putty.
    pub putty_coverage_sq_ft: f64,
    /// Cement: `area * cement_factor / cement_divisor`.
    pub cement_factor: f64,
    /// Cement divisor.
    pub cement_divisor: f64,
    /// Sand: `area * sand_factor / sand_divisor`.
    pub sand_factor: f64,
    /// Sand divisor.
    pub sand_divisor: f64,
    /// Aggregate: `area * aggregate_factor / aggregate_divisor`.
    pub aggregate_factor: f64,
    /// Aggregate divisor.
    pub aggregate_divisor: f64,
    /// Steel per square foot.
    pub steel_per_sq_ft: f64,
}

impl Default for MaterialConstants {
    fn default() -> Self {
        Self {
            door_height_ft: 7.0,
            door_width_ft: 3.0,
            window_height_ft: 4.5,
            window_width_ft: 3.5,
            wall_to_floor_ratio: 3.5,
            paint_coverage_sq_ft: 100.0,
            putty_coverage_sq_ft: 40.0,
            cement_factor: 0.4,
            cement_divisor: 1.5,
            sand_factor: 0.816,
            sand_divisor: 2.0,
            aggregate_factor: 0.608,
            aggregate_divisor: 2.0,
            steel_per_sq_ft: 5.5,
        }
    }
}

/// Estimates costs and materials with the default [`MaterialConstants`].
///
/// The schedule is expected to have passed [`CostSchedule::validate`].
///
/// # Examples
///
/// ```
/// use buildsmart_core::{estimate, CostSchedule, QuantityRecord};
///
/// let record = QuantityRecord::new(607.94, 3, 5).unwrap();
/// let breakdown = estimate(&record, &CostSchedule::default());
/// assert_eq!(breakdown.construction_stage.materials.cement_needed, 163);
/// ```
#[must_use]
pub fn estimate(record: &QuantityRecord, schedule: &CostSchedule) -> CostBreakdown {
    estimate_with(record, schedule, &MaterialConstants::default())
}

/// Estimates costs and materials with explicit material constants.
#[must_use]
pub fn estimate_with(
    record: &QuantityRecord,
    schedule: &CostSchedule,
    constants: &MaterialConstants,
) -> CostBreakdown {
    let area = record.built_up_area_sq_ft();
    let scale = area / schedule.area_under_construction;
    let rates = schedule.total_estimated_expenditure;

    CostBreakdown {
        pre_construction_stage: scale_stage(&schedule.pre_construction_stage, scale),
        construction_stage: ConstructionStageCost {
            cost: scale_stage(&schedule.construction_stage, scale),
            materials: materials(record, constants),
        },
        post_construction_stage: scale_stage(&schedule.post_construction_stage, scale),
        total_cost_estimation: CostRange {
            min: rates.min * area,
            max: rates.max * area,
        },
    }
}

fn scale_stage(stage: &StageSchedule, scale: f64) -> StageCost {
    StageCost {
        total: stage.total * scale,
        details: stage
            .details
            .iter()
            .map(|(item, price)| (item.clone(), price * scale))
            .collect(),
    }
}

#[allow(clippy::suboptimal_flops)]
fn materials(record: &QuantityRecord, c: &MaterialConstants) -> MaterialQuantities {
    let area = record.built_up_area_sq_ft();
    let door_area = c.door_height_ft * c.door_width_ft * f64::from(record.door_count());
    let window_area = c.window_height_ft * c.window_width_ft * f64::from(record.window_count());

    // Not clamped: openings larger than the wall surface give a negative area.
    let paintable_area = area * c.wall_to_floor_ratio - door_area - window_area;
    let coats = paintable_area / c.paint_coverage_sq_ft;

    MaterialQuantities {
        cement_needed: whole_units(area * c.cement_factor / c.cement_divisor),
        sand_needed: whole_units(area * c.sand_factor / c.sand_divisor),
        aggregate_needed: whole_units(area * c.aggregate_factor / c.aggregate_divisor),
        steel_needed: whole_units(area * c.steel_per_sq_ft),
        paint_needed: coats,
        primer_needed: coats,
        putty_needed: paintable_area / c.putty_coverage_sq_ft,
    }
}

/// Rounds up to whole purchase units.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_units(quantity: f64) -> u64 {
    quantity.ceil().max(0.0) as u64
}
