//! Per-tank state and fleet total

use serde::{Deserialize, Serialize};
use tracing::debug;

use fueldip_types::{PerTank, TankId};

use super::variance_evaluator::Evaluation;
use crate::model::{TankState, TankStatus};

/// Outcome of one lookup + evaluation pass for a tank
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TankOutcome {
    Evaluated(Evaluation),
    /// Lookup failed, or the reading is the zero sentinel
    Unevaluated,
}

/// Aggregate shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub total: u64,
    pub overall_alert: bool,
}

/// Owns the three tank states of one session
#[derive(Debug, Clone, Default)]
pub struct TankAggregator {
    tanks: PerTank<TankState>,
}

impl TankAggregator {
    /// All tanks unevaluated
    pub fn new() -> Self {
        Self::default()
    }

    /// All tanks start empty when `start_empty` is set
    pub fn with_initial_empty(start_empty: bool) -> Self {
        if start_empty {
            Self {
                tanks: PerTank::from_fn(|_| TankState::empty()),
            }
        } else {
            Self::new()
        }
    }

    pub fn state(&self, tank: TankId) -> TankState {
        *self.tanks.get(tank)
    }

    pub fn status(&self, tank: TankId) -> TankStatus {
        self.tanks.get(tank).status
    }

    /// Record a completed pass. Ignored while the tank is marked empty.
    pub fn record_tank(&mut self, tank: TankId, outcome: &TankOutcome) -> TankStatus {
        let state = self.tanks.get_mut(tank);
        if state.status == TankStatus::Empty {
            debug!(%tank, "ignoring result for tank marked empty");
            return state.status;
        }
        *state = match outcome {
            TankOutcome::Evaluated(eval) => TankState {
                quantity: eval.quantity,
                status: if eval.alert {
                    TankStatus::Alerting
                } else {
                    TankStatus::Verified
                },
            },
            TankOutcome::Unevaluated => TankState::unevaluated(),
        };
        state.status
    }

    /// Reading selection became invalid
    pub fn clear_tank(&mut self, tank: TankId) {
        let state = self.tanks.get_mut(tank);
        if state.status != TankStatus::Empty {
            *state = TankState::unevaluated();
        }
    }

    pub fn mark_empty(&mut self, tank: TankId) {
        *self.tanks.get_mut(tank) = TankState::empty();
    }

    /// Operator unchecked "empty"; the tank needs a fresh pass
    pub fn unmark_empty(&mut self, tank: TankId) {
        let state = self.tanks.get_mut(tank);
        if state.status == TankStatus::Empty {
            *state = TankState::unevaluated();
        }
    }

    pub fn reset(&mut self) {
        self.tanks = PerTank::from_fn(|_| TankState::unevaluated());
    }

    pub fn total(&self) -> u64 {
        self.tanks
            .iter()
            .map(|(_, state)| u64::from(state.quantity))
            .sum()
    }

    pub fn overall_alert(&self) -> bool {
        self.tanks.iter().any(|(_, state)| state.alert_flag())
    }

    pub fn summary(&self) -> FleetSummary {
        FleetSummary {
            total: self.total(),
            overall_alert: self.overall_alert(),
        }
    }
}
