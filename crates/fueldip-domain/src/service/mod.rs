//! Domain services

pub mod options;
pub mod stick_recommender;
pub mod tank_aggregator;
pub mod tolerance_matcher;
pub mod variance_evaluator;

pub use options::{
    default_selection, pitches, readings_for, roll_inputs, sticks_for, Selection, SelectionDefaults,
};
pub use stick_recommender::recommend;
pub use tank_aggregator::{FleetSummary, TankAggregator, TankOutcome};
pub use tolerance_matcher::lookup;
pub use variance_evaluator::{evaluate, tolerance_kg, Evaluation};
