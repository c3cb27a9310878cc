//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use fueldip_types::OutputFormat;
use fueldip_types::{TankScope, WingSide};

#[derive(Parser)]
#[command(name = "fuel-dip")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "B737 fuel dip calculator - calibrated quantities from dip-stick readings")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory containing the reference CSV files (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate all three tanks and the total
    Calc {
        /// Operator sheet (TOML); flags below override its values
        #[arg(long)]
        sheet: Option<PathBuf>,

        /// Pitch label (defaults to the configured preselection)
        #[arg(long)]
        pitch: Option<String>,

        /// Roll in degrees (defaults to the configured preselection)
        #[arg(long, allow_hyphen_values = true)]
        roll: Option<f64>,

        #[arg(long)]
        left_stick: Option<String>,
        #[arg(long)]
        left_reading: Option<f64>,
        #[arg(long)]
        left_estimate: Option<f64>,
        #[arg(long)]
        left_empty: bool,

        #[arg(long)]
        center_stick: Option<String>,
        #[arg(long)]
        center_reading: Option<f64>,
        #[arg(long)]
        center_estimate: Option<f64>,
        #[arg(long)]
        center_empty: bool,

        #[arg(long)]
        right_stick: Option<String>,
        #[arg(long)]
        right_reading: Option<f64>,
        #[arg(long)]
        right_estimate: Option<f64>,
        #[arg(long)]
        right_empty: bool,
    },

    /// Look up a single calibration point
    Lookup {
        #[arg(long)]
        stick: String,

        #[arg(long)]
        pitch: String,

        #[arg(long, allow_hyphen_values = true)]
        roll: f64,

        #[arg(long)]
        reading: f64,

        #[arg(long, value_enum, default_value_t = WingSide::Left)]
        wing: WingSide,
    },

    /// Recommend a dip stick for an estimated quantity
    Recommend {
        /// Tank scope (wing, center)
        #[arg(long, value_enum)]
        scope: TankScope,

        /// Estimated quantity in kg
        #[arg(long, allow_hyphen_values = true)]
        estimate: f64,
    },

    /// List selectable pitches, rolls, sticks, and readings
    Options {
        /// List readings for this stick
        #[arg(long)]
        stick: Option<String>,

        #[arg(long)]
        pitch: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        roll: Option<f64>,

        #[arg(long, value_enum, default_value_t = WingSide::Left)]
        wing: WingSide,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set reference data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default pitch hint (first pitch containing it is preselected)
        #[arg(long)]
        set_pitch_hint: Option<String>,

        /// Set default stick index
        #[arg(long)]
        set_stick_index: Option<usize>,

        /// Set default roll
        #[arg(long, allow_hyphen_values = true)]
        set_roll: Option<f64>,

        /// Set wing side used for center tank lookups
        #[arg(long, value_enum)]
        set_center_wing_side: Option<WingSide>,

        /// Start sessions with all tanks marked empty
        #[arg(long)]
        set_start_empty: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
