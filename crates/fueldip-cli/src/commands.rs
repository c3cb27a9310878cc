//! Command handlers

use std::path::PathBuf;

use tracing::debug;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::output::{
    output_calc, output_lookup, output_options, output_recommendation, OptionsView, ReadingsView,
};
use fueldip_app::app::{CalcReport, DipSession};
use fueldip_app::config::Config;
use fueldip_app::repository::load_reference_dataset;
use fueldip_app::sheet::{DipSheet, TankEntry};
use fueldip_domain::service::{
    default_selection, lookup, pitches, readings_for, recommend, roll_inputs, sticks_for,
};
use fueldip_types::{Error, Result, TankId, TankScope, WingSide};

/// Command-line values for one tank
#[derive(Debug, Clone, Default)]
struct TankFlags {
    stick: Option<String>,
    reading: Option<f64>,
    estimate: Option<f64>,
    empty: bool,
}

impl TankFlags {
    fn is_given(&self) -> bool {
        self.stick.is_some() || self.reading.is_some() || self.estimate.is_some() || self.empty
    }

    /// Overlay these flags on a sheet entry
    fn apply_to(self, entry: Option<&TankEntry>) -> TankEntry {
        let mut entry = entry.cloned().unwrap_or_default();
        if self.stick.is_some() {
            entry.stick = self.stick;
        }
        if let Some(reading) = self.reading {
            entry.reading = reading;
        }
        if let Some(estimate) = self.estimate {
            entry.estimate = estimate;
        }
        entry.empty |= self.empty;
        entry
    }
}

pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    let format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Calc {
            sheet,
            pitch,
            roll,
            left_stick,
            left_reading,
            left_estimate,
            left_empty,
            center_stick,
            center_reading,
            center_estimate,
            center_empty,
            right_stick,
            right_reading,
            right_estimate,
            right_empty,
        } => {
            let flags = [
                (
                    TankId::Left,
                    TankFlags {
                        stick: left_stick,
                        reading: left_reading,
                        estimate: left_estimate,
                        empty: left_empty,
                    },
                ),
                (
                    TankId::Center,
                    TankFlags {
                        stick: center_stick,
                        reading: center_reading,
                        estimate: center_estimate,
                        empty: center_empty,
                    },
                ),
                (
                    TankId::Right,
                    TankFlags {
                        stick: right_stick,
                        reading: right_reading,
                        estimate: right_estimate,
                        empty: right_empty,
                    },
                ),
            ];
            cmd_calc(&config, format, sheet, pitch, roll, flags)
        }
        Commands::Lookup {
            stick,
            pitch,
            roll,
            reading,
            wing,
        } => {
            let dataset = load_reference_dataset(&config)?;
            let quantity = lookup(&dataset, &stick, &pitch, roll, reading, wing)?;
            output_lookup(format, &stick, &pitch, roll, reading, wing, quantity)
        }
        Commands::Recommend { scope, estimate } => {
            let dataset = load_reference_dataset(&config)?;
            let stick = recommend(&dataset, scope, estimate);
            output_recommendation(format, scope, estimate, stick)
        }
        Commands::Options {
            stick,
            pitch,
            roll,
            wing,
        } => cmd_options(&config, format, stick, pitch, roll, wing),
        Commands::Config {
            show,
            set_data_dir,
            set_output,
            set_pitch_hint,
            set_stick_index,
            set_roll,
            set_center_wing_side,
            set_start_empty,
            reset,
        } => {
            // Reload without the --data-dir override so it is not persisted
            let mut config = Config::load()?;
            if reset {
                config = Config::default();
                config.save()?;
                println!("Configuration reset to defaults.");
                return Ok(());
            }

            let mut changed = false;
            if let Some(dir) = set_data_dir {
                config.data_dir = Some(dir);
                changed = true;
            }
            if let Some(output) = set_output {
                config.output_format = output;
                changed = true;
            }
            if let Some(hint) = set_pitch_hint {
                config.default_pitch_hint = hint;
                changed = true;
            }
            if let Some(index) = set_stick_index {
                config.default_stick_index = index;
                changed = true;
            }
            if let Some(roll) = set_roll {
                config.default_roll = roll;
                changed = true;
            }
            if let Some(side) = set_center_wing_side {
                config.center_wing_side = side;
                changed = true;
            }
            if let Some(start_empty) = set_start_empty {
                config.tanks_start_empty = start_empty;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("Configuration updated.");
            }
            if show || !changed {
                println!("{}", config);
            }
            Ok(())
        }
    }
}

fn cmd_calc(
    config: &Config,
    format: OutputFormat,
    sheet_path: Option<PathBuf>,
    pitch: Option<String>,
    roll: Option<f64>,
    flags: [(TankId, TankFlags); 3],
) -> Result<()> {
    let report = build_calc_report(config, sheet_path, pitch, roll, flags)?;
    output_calc(format, &report)
}

/// Merge sheet and flags, then run one session pass over the given tanks
fn build_calc_report(
    config: &Config,
    sheet_path: Option<PathBuf>,
    pitch: Option<String>,
    roll: Option<f64>,
    flags: [(TankId, TankFlags); 3],
) -> Result<CalcReport> {
    let mut sheet = match sheet_path {
        Some(path) => DipSheet::load(&path)?,
        None => DipSheet::default(),
    };
    if pitch.is_some() {
        sheet.pitch = pitch;
    }
    if roll.is_some() {
        sheet.roll = roll;
    }
    for (tank, tank_flags) in flags {
        if tank_flags.is_given() {
            let entry = tank_flags.apply_to(sheet.entry(tank));
            sheet.set_entry(tank, entry);
        }
    }
    if TankId::ALL.iter().all(|t| sheet.entry(*t).is_none()) {
        return Err(Error::Sheet(
            "no tank inputs given (use --sheet or --left-reading/--center-reading/--right-reading)"
                .to_string(),
        ));
    }

    let dataset = load_reference_dataset(config)?;
    let selection = default_selection(&dataset, &config.selection_defaults());
    debug!(?selection, "default selection");
    let (attitude, inputs) = sheet.resolve(&selection)?;

    let mut session = DipSession::new(dataset, config);
    Ok(session.apply_all(&attitude, &inputs))
}

fn cmd_options(
    config: &Config,
    format: OutputFormat,
    stick: Option<String>,
    pitch: Option<String>,
    roll: Option<f64>,
    wing: WingSide,
) -> Result<()> {
    let dataset = load_reference_dataset(config)?;
    let selection = default_selection(&dataset, &config.selection_defaults());

    let readings = match stick {
        Some(stick) => {
            let pitch = pitch
                .or_else(|| selection.pitch.clone())
                .ok_or_else(|| Error::Sheet("no pitch available".to_string()))?;
            let roll = roll
                .or(selection.roll)
                .ok_or_else(|| Error::Sheet("no roll available".to_string()))?;
            let readings = readings_for(&dataset, &stick, &pitch, wing, roll);
            Some(ReadingsView {
                stick,
                pitch,
                roll,
                wing,
                readings,
            })
        }
        None => None,
    };

    let view = OptionsView {
        pitches: pitches(&dataset).into_iter().map(str::to_string).collect(),
        rolls: roll_inputs(&dataset),
        wing_sticks: sticks_for(&dataset, TankScope::MainWingTank)
            .into_iter()
            .map(str::to_string)
            .collect(),
        center_sticks: sticks_for(&dataset, TankScope::CenterTank)
            .into_iter()
            .map(str::to_string)
            .collect(),
        selection,
        readings,
    };
    output_options(format, &view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fueldip_domain::model::TankStatus;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const CALIBRATION: &str = "\
Stick;Pitch;Wing_Side;Roll_Input;Reading;Fuel_Qty
Stick 8;K;Left;10.0;5.0;4200
Stick 8;K;Left;10.0;5.5;4450
Stick 8;K;Right;10.0;5.0;4150
Stick 3;K;Left;10.0;7.0;9000
";

    const RECOMMENDATIONS: &str = "\
Tank_Scope,Min_Kg,Max_Kg,Recommended_Stick
Center Tank,1000,13000,Stick 3
Main Wing Tank,3000,6000,Stick 8
";

    fn setup() -> (TempDir, Config) {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("App_Ready_Fuel_Database.csv"), CALIBRATION).unwrap();
        fs::write(
            dir.path().join("Master_Stick_Recommendations.csv"),
            RECOMMENDATIONS,
        )
        .unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        (dir, config)
    }

    fn no_flags() -> [(TankId, TankFlags); 3] {
        [
            (TankId::Left, TankFlags::default()),
            (TankId::Center, TankFlags::default()),
            (TankId::Right, TankFlags::default()),
        ]
    }

    #[test]
    fn test_calc_merges_sheet_and_flags() {
        let (dir, config) = setup();
        let sheet_path = dir.path().join("sheet.toml");
        fs::write(
            &sheet_path,
            r#"
pitch = "K"
roll = 10.0

[left]
stick = "Stick 8"
reading = 5.0
estimate = 4000
"#,
        )
        .unwrap();

        let mut flags = no_flags();
        flags[0].1.reading = Some(5.5);
        flags[1].1.empty = true;
        flags[2].1 = TankFlags {
            stick: Some("Stick 8".to_string()),
            reading: Some(5.0),
            estimate: Some(4100.0),
            empty: false,
        };

        let report = build_calc_report(&config, Some(sheet_path), None, None, flags).unwrap();
        assert_eq!(report.attitude.pitch, "K");
        assert_eq!(report.tanks.len(), 3);

        let left = &report.tanks[0];
        assert_eq!(left.quantity, 4450);
        assert_eq!(left.status, TankStatus::Alerting);
        assert_eq!(left.recommended_stick.as_deref(), Some("Stick 8"));

        assert_eq!(report.tanks[1].status, TankStatus::Empty);
        assert_eq!(report.tanks[2].quantity, 4150);
        assert_eq!(report.tanks[2].status, TankStatus::Verified);

        assert_eq!(report.summary.total, 4450 + 4150);
        assert!(report.summary.overall_alert);
    }

    #[test]
    fn test_calc_flags_only_use_default_selection() {
        let (_dir, config) = setup();
        let mut flags = no_flags();
        flags[1].1 = TankFlags {
            stick: Some("Stick 3".to_string()),
            reading: Some(7.0),
            ..TankFlags::default()
        };

        let report = build_calc_report(&config, None, None, None, flags).unwrap();
        assert_eq!(report.attitude.pitch, "K");
        assert_eq!(report.attitude.roll, 10.0);
        assert_eq!(report.tanks.len(), 1);
        assert_eq!(report.tanks[0].quantity, 9000);
        assert_eq!(report.summary.total, 9000);
    }

    #[test]
    fn test_calc_without_tank_inputs() {
        let (_dir, config) = setup();
        let err = build_calc_report(&config, None, Some("K".to_string()), None, no_flags())
            .unwrap_err();
        assert!(matches!(err, Error::Sheet(ref m) if m.contains("no tank inputs")));
    }

    #[test]
    fn test_flags_override_sheet_entry() {
        let sheet_entry = TankEntry {
            stick: Some("Stick 5".to_string()),
            reading: 4.0,
            estimate: 3000.0,
            empty: false,
        };
        let flags = TankFlags {
            reading: Some(4.5),
            ..TankFlags::default()
        };
        let merged = flags.apply_to(Some(&sheet_entry));
        assert_eq!(merged.stick.as_deref(), Some("Stick 5"));
        assert_eq!(merged.reading, 4.5);
        assert_eq!(merged.estimate, 3000.0);
        assert!(!merged.empty);
    }

    #[test]
    fn test_flags_without_sheet() {
        let flags = TankFlags {
            empty: true,
            ..TankFlags::default()
        };
        assert!(flags.is_given());
        let merged = flags.apply_to(None);
        assert!(merged.empty);
        assert_eq!(merged.reading, 0.0);
        assert!(!TankFlags::default().is_given());
    }
}
