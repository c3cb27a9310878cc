//! Stick recommendation by estimated quantity

use fueldip_types::TankScope;

use crate::model::ReferenceDataset;

/// Recommended dip stick for an estimate, `None` when there is no estimate
/// or the estimate falls in a gap between buckets.
pub fn recommend(dataset: &ReferenceDataset, scope: TankScope, estimate_kg: f64) -> Option<&str> {
    if !estimate_kg.is_finite() || estimate_kg <= 0.0 {
        return None;
    }
    dataset
        .recommendations()
        .iter()
        .find(|row| row.tank_scope == scope && row.contains(estimate_kg))
        .map(|row| row.recommended_stick.as_str())
}
