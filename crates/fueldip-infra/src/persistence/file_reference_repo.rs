//! File-based implementation of ReferenceRepository

use std::path::PathBuf;

use tracing::warn;

use fueldip_domain::model::ReferenceDataset;
use fueldip_domain::repository::ReferenceRepository;
use fueldip_types::{DataLoadError, Error};

use crate::reference_csv::{load_fuel_table, load_recommendations};

/// Reference dataset backed by two CSV files
#[derive(Debug, Clone)]
pub struct FileReferenceRepository {
    calibration_path: PathBuf,
    recommendations_path: PathBuf,
}

impl FileReferenceRepository {
    pub fn new(calibration_path: PathBuf, recommendations_path: PathBuf) -> Self {
        Self {
            calibration_path,
            recommendations_path,
        }
    }
}

impl ReferenceRepository for FileReferenceRepository {
    fn load(&self) -> Result<ReferenceDataset, Error> {
        let fuel = load_fuel_table(&self.calibration_path)
            .map_err(|e| e.into_load_error(&self.calibration_path))?;
        if fuel.rows.is_empty() {
            return Err(DataLoadError::Empty(self.calibration_path.display().to_string()).into());
        }
        let recommendations = load_recommendations(&self.recommendations_path)
            .map_err(|e| e.into_load_error(&self.recommendations_path))?;

        let dataset = ReferenceDataset::new(fuel.rows, recommendations.rows);
        for warning in dataset.validate() {
            warn!("reference data: {}", warning);
        }
        Ok(dataset)
    }

    fn describe(&self) -> String {
        format!(
            "{} + {}",
            self.calibration_path.display(),
            self.recommendations_path.display()
        )
    }
}
