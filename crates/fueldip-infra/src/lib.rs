//! Infrastructure layer - reference data loaders and file repositories

pub mod persistence;
pub mod reference_csv;
