//! Immutable reference dataset: calibration table plus stick recommendations

use std::collections::HashMap;
use std::fmt;

use fueldip_types::{TankScope, WingSide};

use super::{within_tolerance, FuelTableRow, RecommendationRow};

/// Data invariant violation found while validating a freshly loaded dataset.
///
/// These are reported, not rejected: the matcher still answers with the first
/// matching row and the recommender with the first matching bucket.
#[derive(Debug, Clone, PartialEq)]
pub enum DataWarning {
    DuplicateReading {
        stick: String,
        pitch: String,
        wing_side: WingSide,
        roll_input: f64,
        reading: f64,
    },
    InvertedBucket {
        tank_scope: TankScope,
        stick: String,
        min_kg: f64,
        max_kg: f64,
    },
    OverlappingBuckets {
        tank_scope: TankScope,
        first: String,
        second: String,
    },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::DuplicateReading {
                stick,
                pitch,
                wing_side,
                roll_input,
                reading,
            } => write!(
                f,
                "duplicate reading {} for {} / {} / {} / roll {}",
                reading, stick, pitch, wing_side, roll_input
            ),
            DataWarning::InvertedBucket {
                tank_scope,
                stick,
                min_kg,
                max_kg,
            } => write!(
                f,
                "{} bucket for {} has Min_Kg {} >= Max_Kg {}",
                tank_scope, stick, min_kg, max_kg
            ),
            DataWarning::OverlappingBuckets {
                tank_scope,
                first,
                second,
            } => write!(
                f,
                "{} buckets for {} and {} overlap",
                tank_scope, first, second
            ),
        }
    }
}

/// Process-wide, read-only reference data. Share it through `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataset {
    fuel_rows: Vec<FuelTableRow>,
    recommendations: Vec<RecommendationRow>,
}

impl ReferenceDataset {
    pub fn new(fuel_rows: Vec<FuelTableRow>, recommendations: Vec<RecommendationRow>) -> Self {
        Self {
            fuel_rows,
            recommendations,
        }
    }

    pub fn fuel_rows(&self) -> &[FuelTableRow] {
        &self.fuel_rows
    }

    pub fn recommendations(&self) -> &[RecommendationRow] {
        &self.recommendations
    }

    /// Rows sharing the categorical key (stick, pitch, wing side)
    pub fn rows_for<'a>(
        &'a self,
        stick: &'a str,
        pitch: &'a str,
        wing_side: WingSide,
    ) -> impl Iterator<Item = &'a FuelTableRow> + 'a {
        self.fuel_rows
            .iter()
            .filter(move |row| row.matches_key(stick, pitch, wing_side))
    }

    /// Check the calibration-curve and bucket invariants
    pub fn validate(&self) -> Vec<DataWarning> {
        let mut warnings = Vec::new();

        let mut groups: HashMap<(&str, &str, WingSide), Vec<&FuelTableRow>> = HashMap::new();
        for row in &self.fuel_rows {
            groups
                .entry((row.stick.as_str(), row.pitch.as_str(), row.wing_side))
                .or_default()
                .push(row);
        }
        let mut keys: Vec<_> = groups.keys().copied().collect();
        keys.sort();
        for key in keys {
            let rows = &groups[&key];
            for (i, a) in rows.iter().enumerate() {
                let duplicate = rows[i + 1..].iter().any(|b| {
                    within_tolerance(a.roll_input, b.roll_input)
                        && within_tolerance(a.reading, b.reading)
                });
                if duplicate {
                    warnings.push(DataWarning::DuplicateReading {
                        stick: a.stick.clone(),
                        pitch: a.pitch.clone(),
                        wing_side: a.wing_side,
                        roll_input: a.roll_input,
                        reading: a.reading,
                    });
                }
            }
        }

        for (i, row) in self.recommendations.iter().enumerate() {
            if row.min_kg >= row.max_kg {
                warnings.push(DataWarning::InvertedBucket {
                    tank_scope: row.tank_scope,
                    stick: row.recommended_stick.clone(),
                    min_kg: row.min_kg,
                    max_kg: row.max_kg,
                });
                continue;
            }
            for other in &self.recommendations[i + 1..] {
                if other.min_kg < other.max_kg && row.overlaps(other) {
                    warnings.push(DataWarning::OverlappingBuckets {
                        tank_scope: row.tank_scope,
                        first: row.recommended_stick.clone(),
                        second: other.recommended_stick.clone(),
                    });
                }
            }
        }

        warnings
    }
}
