use serde::{Deserialize, Serialize};

/// Lifecycle of a single tank within a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankStatus {
    /// Operator marked the tank empty
    Empty,
    /// No valid lookup yet (or the last one was invalidated)
    #[default]
    Unevaluated,
    /// Lookup succeeded and the estimate is within tolerance
    Verified,
    /// Lookup succeeded but the estimate variance is beyond tolerance
    Alerting,
}

impl TankStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TankStatus::Empty => "EMPTY",
            TankStatus::Unevaluated => "-",
            TankStatus::Verified => "OK",
            TankStatus::Alerting => "CHECK",
        }
    }
}

/// Per-tank state held by the aggregator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankState {
    pub quantity: u32,
    pub status: TankStatus,
}

impl TankState {
    pub fn unevaluated() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            quantity: 0,
            status: TankStatus::Empty,
        }
    }

    pub fn alert_flag(&self) -> bool {
        self.status == TankStatus::Alerting
    }

    pub fn empty_flag(&self) -> bool {
        self.status == TankStatus::Empty
    }
}
