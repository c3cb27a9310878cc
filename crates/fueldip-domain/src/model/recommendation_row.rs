use serde::{Deserialize, Serialize};

use fueldip_types::TankScope;

/// Stick recommendation bucket: `[min_kg, max_kg)` within one scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRow {
    pub tank_scope: TankScope,      // Tank_Scope
    pub min_kg: f64,                // Min_Kg (inclusive)
    pub max_kg: f64,                // Max_Kg (exclusive)
    pub recommended_stick: String,  // Recommended_Stick
}

impl RecommendationRow {
    pub fn contains(&self, estimate_kg: f64) -> bool {
        self.min_kg <= estimate_kg && estimate_kg < self.max_kg
    }

    pub fn overlaps(&self, other: &RecommendationRow) -> bool {
        self.tank_scope == other.tank_scope
            && self.min_kg < other.max_kg
            && other.min_kg < self.max_kg
    }
}
