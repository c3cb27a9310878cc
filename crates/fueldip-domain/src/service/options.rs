//! Selection options derived from the reference data
//!
//! The operator picks pitch, roll, stick and reading from these lists. The
//! initial picks are configurable conveniences, not lookup behaviour.

use serde::{Deserialize, Serialize};

use fueldip_types::{TankScope, WingSide};

use crate::model::{within_tolerance, ReferenceDataset};

/// Distinct pitch labels, in table order
pub fn pitches(dataset: &ReferenceDataset) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for row in dataset.fuel_rows() {
        if !seen.contains(&row.pitch.as_str()) {
            seen.push(&row.pitch);
        }
    }
    seen
}

/// Distinct roll inputs, ascending
pub fn roll_inputs(dataset: &ReferenceDataset) -> Vec<f64> {
    let mut rolls: Vec<f64> = dataset.fuel_rows().iter().map(|r| r.roll_input).collect();
    rolls.sort_by(f64::total_cmp);
    rolls.dedup();
    rolls
}

/// Sticks offered for a tank scope.
///
/// Uses the sticks the recommendation table names for the scope; falls back to
/// every stick in the calibration table when the scope has no buckets.
pub fn sticks_for(dataset: &ReferenceDataset, scope: TankScope) -> Vec<&str> {
    let mut sticks: Vec<&str> = Vec::new();
    for row in dataset.recommendations().iter().filter(|r| r.tank_scope == scope) {
        if !sticks.contains(&row.recommended_stick.as_str()) {
            sticks.push(&row.recommended_stick);
        }
    }
    if sticks.is_empty() {
        for row in dataset.fuel_rows() {
            if !sticks.contains(&row.stick.as_str()) {
                sticks.push(&row.stick);
            }
        }
    }
    sticks
}

/// Readings available for a calibration key at a roll, ascending
pub fn readings_for(
    dataset: &ReferenceDataset,
    stick: &str,
    pitch: &str,
    wing_side: WingSide,
    roll_input: f64,
) -> Vec<f64> {
    let mut readings: Vec<f64> = dataset
        .rows_for(stick, pitch, wing_side)
        .filter(|row| within_tolerance(row.roll_input, roll_input))
        .map(|row| row.reading)
        .collect();
    readings.sort_by(f64::total_cmp);
    readings.dedup();
    readings
}

/// Configurable initial picks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionDefaults {
    /// First pitch label containing this text is preselected
    pub pitch_hint: String,
    /// Index into the stick list, clamped to its length
    pub stick_index: usize,
    pub roll: f64,
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            pitch_hint: "K".to_string(),
            stick_index: 5,
            roll: 10.0,
        }
    }
}

/// Initial selection for a fresh session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub pitch: Option<String>,
    pub roll: Option<f64>,
    pub wing_stick: Option<String>,
    pub center_stick: Option<String>,
}

pub fn default_selection(dataset: &ReferenceDataset, defaults: &SelectionDefaults) -> Selection {
    let pitch_list = pitches(dataset);
    let pitch = pitch_list
        .iter()
        .find(|p| !defaults.pitch_hint.is_empty() && p.contains(defaults.pitch_hint.as_str()))
        .or_else(|| pitch_list.first())
        .map(|p| p.to_string());

    let roll_list = roll_inputs(dataset);
    let roll = roll_list
        .iter()
        .copied()
        .find(|r| within_tolerance(*r, defaults.roll))
        .or_else(|| roll_list.first().copied());

    let pick_stick = |scope: TankScope| {
        let sticks = sticks_for(dataset, scope);
        if sticks.is_empty() {
            return None;
        }
        let index = defaults.stick_index.min(sticks.len() - 1);
        Some(sticks[index].to_string())
    };

    Selection {
        pitch,
        roll,
        wing_stick: pick_stick(TankScope::MainWingTank),
        center_stick: pick_stick(TankScope::CenterTank),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FuelTableRow, RecommendationRow};

    fn row(stick: &str, pitch: &str, roll_input: f64, reading: f64) -> FuelTableRow {
        FuelTableRow {
            stick: stick.to_string(),
            pitch: pitch.to_string(),
            wing_side: WingSide::Left,
            roll_input,
            reading,
            fuel_qty: 1000,
        }
    }

    fn bucket(scope: TankScope, min_kg: f64, stick: &str) -> RecommendationRow {
        RecommendationRow {
            tank_scope: scope,
            min_kg,
            max_kg: min_kg + 1000.0,
            recommended_stick: stick.to_string(),
        }
    }

    fn dataset() -> ReferenceDataset {
        ReferenceDataset::new(
            vec![
                row("Stick 1", "J (-0.5)", 0.0, 3.0),
                row("Stick 1", "K (0)", 10.0, 4.0),
                row("Stick 1", "K (0)", 10.0, 2.0),
                row("Stick 1", "K (0)", 10.0, 3.0),
                row("Stick 2", "L (+0.5)", -2.0, 3.0),
            ],
            (1..=7)
                .map(|i| {
                    bucket(
                        TankScope::MainWingTank,
                        i as f64 * 1000.0,
                        &format!("Stick {}", i),
                    )
                })
                .chain([bucket(TankScope::CenterTank, 0.0, "Stick 9")])
                .collect(),
        )
    }

    #[test]
    fn test_option_lists() {
        let ds = dataset();
        assert_eq!(pitches(&ds), vec!["J (-0.5)", "K (0)", "L (+0.5)"]);
        assert_eq!(roll_inputs(&ds), vec![-2.0, 0.0, 10.0]);
        assert_eq!(sticks_for(&ds, TankScope::CenterTank), vec!["Stick 9"]);
        assert_eq!(sticks_for(&ds, TankScope::MainWingTank).len(), 7);
        assert_eq!(
            readings_for(&ds, "Stick 1", "K (0)", WingSide::Left, 10.004),
            vec![2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn test_sticks_fall_back_to_calibration_table() {
        let ds = ReferenceDataset::new(dataset().fuel_rows().to_vec(), vec![]);
        assert_eq!(sticks_for(&ds, TankScope::CenterTank), vec!["Stick 1", "Stick 2"]);
    }

    #[test]
    fn test_default_selection() {
        let selection = default_selection(&dataset(), &SelectionDefaults::default());
        assert_eq!(selection.pitch.as_deref(), Some("K (0)"));
        assert_eq!(selection.roll, Some(10.0));
        assert_eq!(selection.wing_stick.as_deref(), Some("Stick 6"));
        // Index clamped to the single center stick
        assert_eq!(selection.center_stick.as_deref(), Some("Stick 9"));
    }

    #[test]
    fn test_default_selection_fallbacks() {
        let defaults = SelectionDefaults {
            pitch_hint: "Z".to_string(),
            stick_index: 0,
            roll: 45.0,
        };
        let selection = default_selection(&dataset(), &defaults);
        assert_eq!(selection.pitch.as_deref(), Some("J (-0.5)"));
        assert_eq!(selection.roll, Some(-2.0));
        assert_eq!(selection.wing_stick.as_deref(), Some("Stick 1"));

        let empty = default_selection(&ReferenceDataset::default(), &defaults);
        assert_eq!(empty.pitch, None);
        assert_eq!(empty.roll, None);
        assert_eq!(empty.center_stick, None);
    }
}
