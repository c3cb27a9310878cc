//! Variance policy between looked-up and estimated quantities

use serde::{Deserialize, Serialize};

use fueldip_types::TankClass;

/// Center tank operational limit (kg)
pub const CENTER_TANK_TOLERANCE_KG: f64 = 520.0;
/// Left/right main wing tank operational limit (kg)
pub const WING_TANK_TOLERANCE_KG: f64 = 160.0;

pub fn tolerance_kg(class: TankClass) -> f64 {
    match class {
        TankClass::Center => CENTER_TANK_TOLERANCE_KG,
        TankClass::Wing => WING_TANK_TOLERANCE_KG,
    }
}

/// Result of comparing a calculated quantity with the operator's estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Always the calculated quantity; an alert never suppresses it
    pub quantity: u32,
    pub alert: bool,
    /// calculated - estimate, `None` without an estimate
    pub variance_kg: Option<f64>,
}

/// Classify a calculated quantity against an estimate.
///
/// An estimate of zero or less means the operator gave none, which never alerts.
pub fn evaluate(calculated: u32, estimate_kg: f64, class: TankClass) -> Evaluation {
    if !estimate_kg.is_finite() || estimate_kg <= 0.0 {
        return Evaluation {
            quantity: calculated,
            alert: false,
            variance_kg: None,
        };
    }
    let variance = f64::from(calculated) - estimate_kg;
    Evaluation {
        quantity: calculated,
        alert: variance.abs() > tolerance_kg(class),
        variance_kg: Some(variance),
    }
}
