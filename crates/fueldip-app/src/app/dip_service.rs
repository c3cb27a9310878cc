//! Dip Service - per-tank lookup, evaluation, and aggregation
//!
//! One pass per tank:
//! 1. Recommend a stick for the operator's estimate
//! 2. Honour the "empty" checkbox
//! 3. Skip the lookup for the zero-reading sentinel
//! 4. Look up the calibrated quantity
//! 5. Classify it against the estimate
//! 6. Record the outcome in the session's aggregator
//!
//! Lookup failures stay inside the tank that produced them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use fueldip_domain::model::{ReferenceDataset, TankStatus};
use fueldip_domain::service::{
    evaluate, lookup, recommend, FleetSummary, TankAggregator, TankOutcome,
};
use fueldip_types::{LookupError, TankId, WingSide};

use crate::config::Config;

/// Attitude shared by all three tanks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    pub pitch: String,
    pub roll: f64,
}

/// Operator input for one tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankInput {
    pub tank: TankId,
    pub stick: String,
    /// 0.0 means no reading selected
    pub reading: f64,
    /// 0.0 or less means no estimate
    pub estimate_kg: f64,
    pub empty: bool,
}

/// Per-tank result shown to the operator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TankReport {
    pub tank: TankId,
    pub stick: String,
    pub reading: f64,
    pub quantity: u32,
    pub alert: bool,
    pub status: TankStatus,
    pub recommended_stick: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    #[serde(skip)]
    pub lookup_error: Option<LookupError>,
}

/// All tank reports plus the aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcReport {
    pub attitude: Attitude,
    pub tanks: Vec<TankReport>,
    pub summary: FleetSummary,
}

/// Run the lookup and evaluation for one tank without touching any state.
///
/// `wing_side` is the side used for the lookup; the center tank has none of
/// its own and uses the configured one.
pub fn compute_tank(
    dataset: &ReferenceDataset,
    attitude: &Attitude,
    input: &TankInput,
    wing_side: WingSide,
) -> (TankOutcome, Option<LookupError>) {
    if input.reading == 0.0 {
        debug!(tank = %input.tank, "no reading selected");
        return (TankOutcome::Unevaluated, None);
    }

    match lookup(
        dataset,
        &input.stick,
        &attitude.pitch,
        attitude.roll,
        input.reading,
        wing_side,
    ) {
        Ok(calculated) => {
            let evaluation = evaluate(calculated, input.estimate_kg, input.tank.class());
            if evaluation.alert {
                warn!(
                    tank = %input.tank,
                    calculated,
                    estimate = input.estimate_kg,
                    "variance beyond tolerance"
                );
            }
            (TankOutcome::Evaluated(evaluation), None)
        }
        Err(err) => {
            warn!(tank = %input.tank, "{}", err);
            (TankOutcome::Unevaluated, Some(err))
        }
    }
}

/// One operator session over a shared, read-only dataset
#[derive(Debug, Clone)]
pub struct DipSession {
    dataset: Arc<ReferenceDataset>,
    aggregator: TankAggregator,
    center_wing_side: WingSide,
}

impl DipSession {
    pub fn new(dataset: Arc<ReferenceDataset>, config: &Config) -> Self {
        Self {
            dataset,
            aggregator: TankAggregator::with_initial_empty(config.tanks_start_empty),
            center_wing_side: config.center_wing_side,
        }
    }

    pub fn aggregator(&self) -> &TankAggregator {
        &self.aggregator
    }

    fn wing_side_for(&self, tank: TankId) -> WingSide {
        tank.wing_side().unwrap_or(self.center_wing_side)
    }

    /// Process one tank's input and record the outcome
    pub fn apply(&mut self, attitude: &Attitude, input: &TankInput) -> TankReport {
        let recommended_stick =
            recommend(&self.dataset, input.tank.class().scope(), input.estimate_kg)
                .map(str::to_string);

        let mut lookup_error = None;
        let mut variance_kg = None;
        if input.empty {
            self.aggregator.mark_empty(input.tank);
        } else {
            self.aggregator.unmark_empty(input.tank);
            let (outcome, err) = compute_tank(
                &self.dataset,
                attitude,
                input,
                self.wing_side_for(input.tank),
            );
            if let TankOutcome::Evaluated(evaluation) = &outcome {
                variance_kg = evaluation.variance_kg;
            }
            self.aggregator.record_tank(input.tank, &outcome);
            lookup_error = err;
        }

        let state = self.aggregator.state(input.tank);
        TankReport {
            tank: input.tank,
            stick: input.stick.clone(),
            reading: input.reading,
            quantity: state.quantity,
            alert: state.alert_flag(),
            status: state.status,
            recommended_stick,
            variance_kg,
            diagnostic: lookup_error.as_ref().map(|e| e.to_string()),
            lookup_error,
        }
    }

    /// Process every given tank, then report the aggregate
    pub fn apply_all(&mut self, attitude: &Attitude, inputs: &[TankInput]) -> CalcReport {
        let tanks = inputs
            .iter()
            .map(|input| self.apply(attitude, input))
            .collect();
        CalcReport {
            attitude: attitude.clone(),
            tanks,
            summary: self.summary(),
        }
    }

    pub fn summary(&self) -> FleetSummary {
        self.aggregator.summary()
    }

    pub fn reset(&mut self) {
        self.aggregator.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fueldip_domain::model::{FuelTableRow, RecommendationRow};
    use fueldip_types::TankScope;

    fn row(stick: &str, wing_side: WingSide, reading: f64, fuel_qty: u32) -> FuelTableRow {
        FuelTableRow {
            stick: stick.to_string(),
            pitch: "K".to_string(),
            wing_side,
            roll_input: 10.0,
            reading,
            fuel_qty,
        }
    }

    fn dataset() -> Arc<ReferenceDataset> {
        Arc::new(ReferenceDataset::new(
            vec![
                row("Stick 8", WingSide::Left, 5.0, 4200),
                row("Stick 8", WingSide::Right, 5.0, 4150),
                row("Stick 2", WingSide::Left, 7.0, 9000),
            ],
            vec![
                RecommendationRow {
                    tank_scope: TankScope::MainWingTank,
                    min_kg: 3000.0,
                    max_kg: 5000.0,
                    recommended_stick: "Stick 8".to_string(),
                },
                RecommendationRow {
                    tank_scope: TankScope::CenterTank,
                    min_kg: 5000.0,
                    max_kg: 13000.0,
                    recommended_stick: "Stick 2".to_string(),
                },
            ],
        ))
    }

    fn attitude() -> Attitude {
        Attitude {
            pitch: "K".to_string(),
            roll: 10.0,
        }
    }

    fn input(tank: TankId, stick: &str, reading: f64, estimate_kg: f64) -> TankInput {
        TankInput {
            tank,
            stick: stick.to_string(),
            reading,
            estimate_kg,
            empty: false,
        }
    }

    #[test]
    fn test_three_tanks_total() {
        let mut session = DipSession::new(dataset(), &Config::default());
        let report = session.apply_all(
            &attitude(),
            &[
                input(TankId::Left, "Stick 8", 5.0, 4000.0),
                input(TankId::Center, "Stick 2", 7.0, 9000.0),
                input(TankId::Right, "Stick 8", 5.0, 4100.0),
            ],
        );

        assert_eq!(report.summary.total, 4200 + 9000 + 4150);
        assert!(report.summary.overall_alert);

        let left = &report.tanks[0];
        assert!(left.alert);
        assert_eq!(left.status, TankStatus::Alerting);
        assert_eq!(left.quantity, 4200);
        assert_eq!(left.variance_kg, Some(200.0));
        assert_eq!(left.recommended_stick.as_deref(), Some("Stick 8"));

        let center = &report.tanks[1];
        assert_eq!(center.status, TankStatus::Verified);
        assert_eq!(center.recommended_stick.as_deref(), Some("Stick 2"));
    }

    #[test]
    fn test_lookup_failure_is_contained() {
        let mut session = DipSession::new(dataset(), &Config::default());
        let report = session.apply_all(
            &Attitude {
                pitch: "K".to_string(),
                roll: 12.0,
            },
            &[input(TankId::Left, "Stick 8", 5.0, 0.0)],
        );
        let left = &report.tanks[0];
        assert_eq!(left.status, TankStatus::Unevaluated);
        assert_eq!(
            left.lookup_error,
            Some(LookupError::NoCalibrationData {
                valid_rolls: vec![10.0]
            })
        );
        assert!(left.diagnostic.as_deref().unwrap_or("").contains("10"));

        // Other tanks still evaluate
        let right = session.apply(&attitude(), &input(TankId::Right, "Stick 8", 5.0, 0.0));
        assert_eq!(right.quantity, 4150);
        assert_eq!(session.summary().total, 4150);
    }

    #[test]
    fn test_zero_reading_reverts_to_unevaluated() {
        let mut session = DipSession::new(dataset(), &Config::default());
        session.apply(&attitude(), &input(TankId::Left, "Stick 8", 5.0, 0.0));
        assert_eq!(session.summary().total, 4200);

        let report = session.apply(&attitude(), &input(TankId::Left, "Stick 8", 0.0, 0.0));
        assert_eq!(report.status, TankStatus::Unevaluated);
        assert!(report.lookup_error.is_none());
        assert_eq!(session.summary().total, 0);
    }

    #[test]
    fn test_empty_checkbox() {
        let mut session = DipSession::new(dataset(), &Config::default());
        let mut center = input(TankId::Center, "Stick 2", 7.0, 1000.0);
        center.empty = true;
        let report = session.apply(&attitude(), &center);
        assert_eq!(report.status, TankStatus::Empty);
        assert_eq!(report.quantity, 0);
        assert!(!report.alert);

        center.empty = false;
        let report = session.apply(&attitude(), &center);
        assert_eq!(report.quantity, 9000);
        assert!(report.alert);
    }

    #[test]
    fn test_center_uses_configured_wing_side() {
        let config = Config {
            center_wing_side: WingSide::Right,
            ..Config::default()
        };
        let mut session = DipSession::new(dataset(), &config);
        let report = session.apply(&attitude(), &input(TankId::Center, "Stick 8", 5.0, 0.0));
        assert_eq!(report.quantity, 4150);
    }

    #[test]
    fn test_session_starts_empty_when_configured() {
        let config = Config {
            tanks_start_empty: true,
            ..Config::default()
        };
        let mut session = DipSession::new(dataset(), &config);
        assert_eq!(session.aggregator().status(TankId::Right), TankStatus::Empty);

        session.apply(&attitude(), &input(TankId::Right, "Stick 8", 5.0, 0.0));
        assert_eq!(session.aggregator().status(TankId::Right), TankStatus::Verified);

        session.reset();
        assert_eq!(session.aggregator().status(TankId::Right), TankStatus::Unevaluated);
        assert_eq!(session.summary().total, 0);
    }
}
