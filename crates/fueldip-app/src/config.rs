//! Configuration management for fuel-dip
//!
//! Config stored at: ~/.config/fuel-dip/config.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fueldip_domain::service::SelectionDefaults;
use fueldip_types::{ConfigError, OutputFormat, Result, WingSide};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the reference CSV files (current directory if unset)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Calibration table file name
    #[serde(default = "default_calibration_file")]
    pub calibration_file: String,

    /// Stick recommendation table file name
    #[serde(default = "default_recommendations_file")]
    pub recommendations_file: String,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Preselect the first pitch label containing this text
    #[serde(default = "default_pitch_hint")]
    pub default_pitch_hint: String,

    /// Preselected position in each stick list
    #[serde(default = "default_stick_index")]
    pub default_stick_index: usize,

    /// Preselected roll (degrees)
    #[serde(default = "default_roll")]
    pub default_roll: f64,

    /// Wing_Side used for center tank lookups
    #[serde(default)]
    pub center_wing_side: WingSide,

    /// Start every session with all tanks marked empty
    #[serde(default)]
    pub tanks_start_empty: bool,
}

fn default_calibration_file() -> String {
    "App_Ready_Fuel_Database.csv".to_string()
}

fn default_recommendations_file() -> String {
    "Master_Stick_Recommendations.csv".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_pitch_hint() -> String {
    "K".to_string()
}

fn default_stick_index() -> usize {
    5
}

fn default_roll() -> f64 {
    10.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            calibration_file: default_calibration_file(),
            recommendations_file: default_recommendations_file(),
            output_format: default_output_format(),
            default_pitch_hint: default_pitch_hint(),
            default_stick_index: default_stick_index(),
            default_roll: default_roll(),
            center_wing_side: WingSide::Left,
            tanks_start_empty: false,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("fuel-dip");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn calibration_path(&self) -> PathBuf {
        self.data_dir().join(&self.calibration_file)
    }

    pub fn recommendations_path(&self) -> PathBuf {
        self.data_dir().join(&self.recommendations_file)
    }

    pub fn selection_defaults(&self) -> SelectionDefaults {
        SelectionDefaults {
            pitch_hint: self.default_pitch_hint.clone(),
            stick_index: self.default_stick_index,
            roll: self.default_roll,
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fuel Dip Configuration")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(f, "Calibration:       {}", self.calibration_path().display())?;
        writeln!(f, "Recommendations:   {}", self.recommendations_path().display())?;
        writeln!(f, "Output format:     {}", self.output_format)?;
        writeln!(f, "Default pitch:     contains {:?}", self.default_pitch_hint)?;
        writeln!(f, "Default stick:     #{}", self.default_stick_index)?;
        writeln!(f, "Default roll:      {}", self.default_roll)?;
        writeln!(f, "Center wing side:  {}", self.center_wing_side)?;
        writeln!(f, "Tanks start empty: {}", self.tanks_start_empty)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:       {}", path.display())?;
        }

        Ok(())
    }
}
