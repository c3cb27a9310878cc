//! Error types for fuel-dip

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Reference dataset could not be loaded. Fatal to the session.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Reference file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Missing required column {column:?} in {file}")]
    MissingColumn { file: String, column: String },

    #[error("No usable rows in {0}")]
    Empty(String),
}

/// Tank-local lookup failures. Recoverable: the tank stays unevaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("No calibration data for this attitude (valid roll values: {})", format_rolls(.valid_rolls))]
    NoCalibrationData { valid_rolls: Vec<f64> },

    #[error("No calibration point for this reading")]
    NoCalibrationPoint,

    #[error("Invalid lookup input: {0}")]
    InvalidInput(String),
}

fn format_rolls(rolls: &[f64]) -> String {
    if rolls.is_empty() {
        return "none".to_string();
    }
    rolls
        .iter()
        .map(|r| format!("{}", r))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data load failed: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Invalid operator sheet: {0}")]
    Sheet(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_calibration_data_lists_rolls() {
        let err = LookupError::NoCalibrationData {
            valid_rolls: vec![0.0, 2.5, 10.0],
        };
        assert_eq!(
            err.to_string(),
            "No calibration data for this attitude (valid roll values: 0, 2.5, 10)"
        );

        let err = LookupError::NoCalibrationData { valid_rolls: vec![] };
        assert!(err.to_string().ends_with("(valid roll values: none)"));
    }

    #[test]
    fn test_data_load_error_converts() {
        let err: Error = DataLoadError::Empty("fuel.csv".to_string()).into();
        assert!(matches!(err, Error::DataLoad(_)));
        assert_eq!(err.to_string(), "Data load failed: No usable rows in fuel.csv");
    }
}
