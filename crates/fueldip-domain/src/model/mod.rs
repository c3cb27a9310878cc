//! Domain model types

pub mod fuel_table_row;
pub mod recommendation_row;
pub mod reference_dataset;
pub mod tank_state;

pub use fuel_table_row::{within_tolerance, FuelTableRow, MATCH_TOLERANCE};
pub use recommendation_row::RecommendationRow;
pub use reference_dataset::{DataWarning, ReferenceDataset};
pub use tank_state::{TankState, TankStatus};
