//! Repository adapters for the reference data

use std::sync::Arc;

use tracing::info;

use fueldip_domain::model::ReferenceDataset;
use fueldip_domain::repository::ReferenceRepository;
use fueldip_infra::persistence::FileReferenceRepository;
use fueldip_types::Result;

use crate::config::Config;

/// Open the file-based reference repository named by the config
pub fn open_reference_repo(config: &Config) -> FileReferenceRepository {
    FileReferenceRepository::new(config.calibration_path(), config.recommendations_path())
}

/// Load the shared dataset once for the process
pub fn load_reference_dataset(config: &Config) -> Result<Arc<ReferenceDataset>> {
    let repo = open_reference_repo(config);
    let dataset = repo.load()?;
    info!(
        source = %repo.describe(),
        calibration_rows = dataset.fuel_rows().len(),
        recommendation_rows = dataset.recommendations().len(),
        "reference data ready"
    );
    Ok(Arc::new(dataset))
}
