use serde::Serialize;

use crate::error::QuantityError;

/// Largest accepted built-up area, sq ft.
///
/// Keeps every scaled amount finite for any validated schedule of realistic
/// magnitude; larger values would serialize as `null`.
pub const MAX_BUILT_UP_AREA_SQ_FT: f64 = 1.0e9;

/// Structural quantities read off a floor plan.
///
/// Construction goes through [`QuantityRecord::new`], so every record in
/// circulation has a finite built-up area in `(0, MAX_BUILT_UP_AREA_SQ_FT]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantityRecord {
    built_up_area_sq_ft: f64,
    door_count: u32,
    window_count: u32,
}

impl QuantityRecord {
    /// Creates a record after checking the area.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::InvalidArea`] when the area is not finite or
    /// not greater than zero, and [`QuantityError::AreaTooLarge`] above
    /// [`MAX_BUILT_UP_AREA_SQ_FT`].
    pub fn new(
        built_up_area_sq_ft: f64,
        door_count: u32,
        window_count: u32,
    ) -> Result<Self, QuantityError> {
        if !built_up_area_sq_ft.is_finite() || built_up_area_sq_ft <= 0.0 {
            return Err(QuantityError::InvalidArea(built_up_area_sq_ft));
        }
        if built_up_area_sq_ft > MAX_BUILT_UP_AREA_SQ_FT {
            return Err(QuantityError::AreaTooLarge {
                area: built_up_area_sq_ft,
                max: MAX_BUILT_UP_AREA_SQ_FT,
            });
        }
        Ok(Self {
            built_up_area_sq_ft,
            door_count,
            window_count,
        })
    }

    /// Total enclosed floor area in square feet.
    #[must_use]
    pub const fn built_up_area_sq_ft(&self) -> f64 {
        self.built_up_area_sq_ft
    }

    /// Number of doors on the plan.
    #[must_use]
    pub const fn door_count(&self) -> u32 {
        self.door_count
    }

    /// Number of windows on the plan.
    #[must_use]
    pub const fn window_count(&self) -> u32 {
        self.window_count
    }
}
