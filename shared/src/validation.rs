//! Validation utilities for roast parameters
//!
//! Out-of-range inputs are rejected, never clamped.

use crate::error::{RoastError, RoastResult};

// ============================================================================
// Generation Parameters
// ============================================================================

/// Lowest accepted charge temperature (°C)
pub const MIN_CHARGE_TEMP_C: f64 = 150.0;
/// Highest accepted charge temperature (°C)
pub const MAX_CHARGE_TEMP_C: f64 = 250.0;

/// Smallest accepted batch (g)
pub const MIN_BATCH_SIZE_G: u32 = 100;
/// Largest accepted batch (g)
pub const MAX_BATCH_SIZE_G: u32 = 1000;

/// Validate charge temperature is in the plausible roasting range (150-250 °C)
pub fn validate_charge_temperature(charge_temp: f64) -> RoastResult<()> {
    if !charge_temp.is_finite() {
        return Err(RoastError::invalid_parameter(
            "charge_temp",
            "must be a finite number",
        ));
    }
    if !(MIN_CHARGE_TEMP_C..=MAX_CHARGE_TEMP_C).contains(&charge_temp) {
        return Err(RoastError::invalid_parameter(
            "charge_temp",
            format!(
                "{} °C is outside {}-{} °C",
                charge_temp, MIN_CHARGE_TEMP_C, MAX_CHARGE_TEMP_C
            ),
        ));
    }
    Ok(())
}

/// Validate development time percentage is strictly between 0 and 100
pub fn validate_development_time(development_time_pct: f64) -> RoastResult<()> {
    if !development_time_pct.is_finite() {
        return Err(RoastError::invalid_parameter(
            "development_time_pct",
            "must be a finite number",
        ));
    }
    if development_time_pct <= 0.0 || development_time_pct >= 100.0 {
        return Err(RoastError::invalid_parameter(
            "development_time_pct",
            format!("{}% must be greater than 0 and less than 100", development_time_pct),
        ));
    }
    Ok(())
}

// ============================================================================
// Session Parameters
// ============================================================================

/// Validate batch size (100-1000 g)
pub fn validate_batch_size(batch_size_g: u32) -> RoastResult<()> {
    if !(MIN_BATCH_SIZE_G..=MAX_BATCH_SIZE_G).contains(&batch_size_g) {
        return Err(RoastError::invalid_parameter(
            "batch_size_g",
            format!(
                "{} g is outside {}-{} g",
                batch_size_g, MIN_BATCH_SIZE_G, MAX_BATCH_SIZE_G
            ),
        ));
    }
    Ok(())
}

/// Validate an elapsed-time query
pub fn validate_elapsed(elapsed_minutes: f64) -> RoastResult<()> {
    if elapsed_minutes.is_nan() || elapsed_minutes < 0.0 {
        return Err(RoastError::invalid_parameter(
            "elapsed_minutes",
            "must be zero or positive",
        ));
    }
    Ok(())
}
