//! Baseline cost schedules.
//!
//! A schedule is priced for a reference area (`areaUnderConstruction`). Stage
//! totals and their line items are scaled linearly to the measured area; the
//! total expenditure range is a per-square-foot rate.
//!
//! Schedules deserialize from the camelCase layout used by the cost tables,
//! either bare or wrapped in a `{"cost_data": {...}}` envelope.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Baseline cost for one construction stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSchedule {
    /// Stage total for the reference area.
    pub total: f64,
    /// Itemized costs for the reference area, keyed by line item.
    #[serde(default)]
    pub details: BTreeMap<String, f64>,
}

impl StageSchedule {
    fn from_items(total: f64, items: &[(&str, f64)]) -> Self {
        Self {
            total,
            details: items
                .iter()
                .map(|(name, value)| ((*name).to_string(), *value))
                .collect(),
        }
    }
}

/// Per-unit-area expenditure rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenditureRange {
    /// Lower expenditure rate per unit area.
    pub min: f64,
    /// Upper expenditure rate per unit area.
    pub max: f64,
}

/// Read-only baseline cost table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSchedule {
    /// Area the stage amounts are priced for.
    pub area_under_construction: f64,
    /// Unit label for the reference area.
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Per-unit-area total expenditure rates.
    pub total_estimated_expenditure: ExpenditureRange,
    /// Pre-construction stage baseline.
    pub pre_construction_stage: StageSchedule,
    /// Construction stage baseline.
    pub construction_stage: StageSchedule,
    /// Post-construction stage baseline.
    pub post_construction_stage: StageSchedule,
}

fn default_unit() -> String {
    "Sq Feet".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScheduleDocument {
    Wrapped { cost_data: CostSchedule },
    Bare(CostSchedule),
}

impl Default for CostSchedule {
    /// The stock per-square-foot schedule.
    fn default() -> Self {
        Self {
            area_under_construction: 1.0,
            unit: default_unit(),
            total_estimated_expenditure: ExpenditureRange {
                min: 1715.0,
                max: 1785.0,
            },
            pre_construction_stage: StageSchedule::from_items(
                123.0,
                &[("designFees", 70.0), ("borewell", 53.0)],
            ),
            construction_stage: StageSchedule::from_items(
                1159.0,
                &[
                    ("markingExcavation", 53.0),
                    ("sand", 70.0),
                    ("water", 18.0),
                    ("steelReinforcement", 70.0),
                    ("bricks", 158.0),
                    ("stoneAggregates", 88.0),
                    ("concreteContractor", 158.0),
                    ("formworkFramework", 53.0),
                    ("plumbingSanitation", 123.0),
                    ("electricalWork", 88.0),
                    ("compoundWallDoorEntrance", 35.0),
                    ("soil", 35.0),
                    ("cement", 210.0),
                ],
            ),
            post_construction_stage: StageSchedule::from_items(
                445.0,
                &[
                    ("painting", 175.0),
                    ("exteriorFlooring", 105.0),
                    ("doorsWindows", 25.0),
                    ("miscellaneous", 140.0),
                ],
            ),
        }
    }
}

impl CostSchedule {
    /// Parses and validates a schedule from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Parse`] for malformed JSON and the validation
    /// errors of [`CostSchedule::validate`] otherwise.
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        let schedule = match serde_json::from_str::<ScheduleDocument>(json) {
            Ok(ScheduleDocument::Wrapped { cost_data }) => cost_data,
            Ok(ScheduleDocument::Bare(schedule)) => schedule,
            // Re-parse as the bare layout to surface a useful serde message.
            Err(_) => serde_json::from_str::<Self>(json)?,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Reads, parses and validates a schedule file.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Read`] if the file cannot be read, otherwise
    /// the errors of [`CostSchedule::from_json_str`].
    pub fn from_json_file(path: &Path) -> Result<Self, ScheduleError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScheduleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks that the schedule can be used by the estimator.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: a non-positive reference area, a
    /// negative or non-finite amount, or an inverted expenditure range.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if !self.area_under_construction.is_finite() || self.area_under_construction <= 0.0 {
            return Err(ScheduleError::InvalidReferenceArea(
                self.area_under_construction,
            ));
        }

        let range = self.total_estimated_expenditure;
        check_amount("totalEstimatedExpenditure.min", range.min)?;
        check_amount("totalEstimatedExpenditure.max", range.max)?;
        if range.min > range.max {
            return Err(ScheduleError::InvertedRange {
                min: range.min,
                max: range.max,
            });
        }

        for (name, stage) in self.stages() {
            check_amount(&format!("{name}.total"), stage.total)?;
            for (item, value) in &stage.details {
                check_amount(&format!("{name}.details.{item}"), *value)?;
            }
        }

        Ok(())
    }

    fn stages(&self) -> [(&'static str, &StageSchedule); 3] {
        [
            ("preConstructionStage", &self.pre_construction_stage),
            ("constructionStage", &self.construction_stage),
            ("postConstructionStage", &self.post_construction_stage),
        ]
    }
}

fn check_amount(field: &str, value: f64) -> Result<(), ScheduleError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ScheduleError::InvalidAmount {
            field: field.to_string(),
            value,
        })
    }
}
