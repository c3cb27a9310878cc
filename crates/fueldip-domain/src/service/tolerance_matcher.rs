//! Calibration table lookup
//!
//! Categorical axes (stick, pitch, wing side) match exactly; roll and reading
//! match within an absolute tolerance because they come from a fixed set of
//! UI values but are stored as floating point.

use tracing::debug;

use fueldip_types::{LookupError, WingSide};

use crate::model::{within_tolerance, ReferenceDataset};

/// Look up the fuel quantity (kg) for a stick reading at the given attitude.
///
/// # Errors
/// * `NoCalibrationData` - no row for this roll under the categorical key;
///   carries the roll values that do exist for the key, sorted.
/// * `NoCalibrationPoint` - roll matched but no row has this reading.
/// * `InvalidInput` - empty categorical value or non-finite number.
pub fn lookup(
    dataset: &ReferenceDataset,
    stick: &str,
    pitch: &str,
    roll_input: f64,
    reading: f64,
    wing_side: WingSide,
) -> Result<u32, LookupError> {
    let stick = stick.trim();
    let pitch = pitch.trim();
    if stick.is_empty() {
        return Err(LookupError::InvalidInput("stick is empty".to_string()));
    }
    if pitch.is_empty() {
        return Err(LookupError::InvalidInput("pitch is empty".to_string()));
    }
    if !roll_input.is_finite() || !reading.is_finite() {
        return Err(LookupError::InvalidInput(format!(
            "roll {} / reading {} must be finite",
            roll_input, reading
        )));
    }

    let attitude: Vec<_> = dataset
        .rows_for(stick, pitch, wing_side)
        .filter(|row| within_tolerance(row.roll_input, roll_input))
        .collect();

    if attitude.is_empty() {
        let mut valid_rolls: Vec<f64> = dataset
            .rows_for(stick, pitch, wing_side)
            .map(|row| row.roll_input)
            .collect();
        valid_rolls.sort_by(f64::total_cmp);
        valid_rolls.dedup();
        debug!(stick, pitch, %wing_side, roll_input, "no calibration data for roll");
        return Err(LookupError::NoCalibrationData { valid_rolls });
    }

    match attitude
        .iter()
        .find(|row| within_tolerance(row.reading, reading))
    {
        Some(row) => {
            debug!(
                stick,
                pitch,
                %wing_side,
                roll_input,
                reading,
                fuel_qty = row.fuel_qty,
                "calibration match"
            );
            Ok(row.fuel_qty)
        }
        None => {
            debug!(
                stick,
                pitch,
                %wing_side,
                roll_input,
                reading,
                "no calibration point for reading"
            );
            Err(LookupError::NoCalibrationPoint)
        }
    }
}
