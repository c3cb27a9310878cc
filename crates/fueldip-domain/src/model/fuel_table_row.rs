use serde::{Deserialize, Serialize};

use fueldip_types::WingSide;

/// Absolute tolerance for roll and reading matches
pub const MATCH_TOLERANCE: f64 = 0.01;

// Absorbs representation error so that e.g. 10.01 vs 10.0 still matches.
const BOUNDARY_SLACK: f64 = 1e-9;

/// Whether two roll or reading values denote the same calibration point
pub fn within_tolerance(a: f64, b: f64) -> bool {
    (a - b).abs() <= MATCH_TOLERANCE + BOUNDARY_SLACK
}

/// One calibration point of the fuel table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelTableRow {
    pub stick: String,          // Stick
    pub pitch: String,          // Pitch
    pub wing_side: WingSide,    // Wing_Side
    pub roll_input: f64,        // Roll_Input (degrees)
    pub reading: f64,           // Reading
    pub fuel_qty: u32,          // Fuel_Qty (kg)
}

impl FuelTableRow {
    /// Whether the categorical axes equal the given key (case-sensitive)
    pub fn matches_key(&self, stick: &str, pitch: &str, wing_side: WingSide) -> bool {
        self.stick == stick && self.pitch == pitch && self.wing_side == wing_side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_tolerance_boundary() {
        assert!(within_tolerance(10.0, 10.01));
        assert!(within_tolerance(-2.5, -2.49));
        assert!(!within_tolerance(10.0, 10.02));
    }
}
