//! Repository trait definitions for reference data

use fueldip_types::Error;

use crate::model::ReferenceDataset;

/// Source of the reference dataset (calibration + recommendation tables)
pub trait ReferenceRepository {
    /// Load and validate the full dataset
    fn load(&self) -> Result<ReferenceDataset, Error>;

    /// Human-readable description of where the data comes from
    fn describe(&self) -> String;
}
