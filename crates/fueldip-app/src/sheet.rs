//! Operator dip sheet (TOML)
//!
//! ```toml
//! pitch = "K (0)"
//! roll = 10.0
//!
//! [left]
//! stick = "Stick 6"
//! reading = 5.0
//! estimate = 4000
//!
//! [center]
//! empty = true
//! ```
//!
//! Pitch, roll and sticks fall back to the session's default selection.
//! Tanks without a section keep their initial state.

use std::path::Path;

use serde::Deserialize;

use fueldip_domain::service::Selection;
use fueldip_types::{Error, Result, TankClass, TankId};

use crate::app::{Attitude, TankInput};

/// Per-tank section of a sheet
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TankEntry {
    pub stick: Option<String>,
    #[serde(default)]
    pub reading: f64,
    #[serde(default)]
    pub estimate: f64,
    #[serde(default)]
    pub empty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DipSheet {
    pub pitch: Option<String>,
    pub roll: Option<f64>,
    pub left: Option<TankEntry>,
    pub center: Option<TankEntry>,
    pub right: Option<TankEntry>,
}

impl DipSheet {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Sheet(e.to_string()))
    }

    pub fn entry(&self, tank: TankId) -> Option<&TankEntry> {
        match tank {
            TankId::Left => self.left.as_ref(),
            TankId::Center => self.center.as_ref(),
            TankId::Right => self.right.as_ref(),
        }
    }

    pub fn set_entry(&mut self, tank: TankId, entry: TankEntry) {
        let slot = match tank {
            TankId::Left => &mut self.left,
            TankId::Center => &mut self.center,
            TankId::Right => &mut self.right,
        };
        *slot = Some(entry);
    }

    /// Resolve defaults and produce session inputs
    pub fn resolve(&self, selection: &Selection) -> Result<(Attitude, Vec<TankInput>)> {
        let pitch = self
            .pitch
            .clone()
            .or_else(|| selection.pitch.clone())
            .ok_or_else(|| Error::Sheet("no pitch given and no default available".to_string()))?;
        let roll = self
            .roll
            .or(selection.roll)
            .ok_or_else(|| Error::Sheet("no roll given and no default available".to_string()))?;

        let mut inputs = Vec::new();
        for tank in TankId::ALL {
            let Some(entry) = self.entry(tank) else {
                continue;
            };
            let default_stick = match tank.class() {
                TankClass::Wing => selection.wing_stick.as_ref(),
                TankClass::Center => selection.center_stick.as_ref(),
            };
            let stick = match (&entry.stick, default_stick) {
                (Some(stick), _) => stick.clone(),
                (None, Some(stick)) => stick.clone(),
                // An empty tank needs no stick
                (None, None) if entry.empty => String::new(),
                (None, None) => {
                    return Err(Error::Sheet(format!(
                        "no stick given for {} and no default available",
                        tank
                    )))
                }
            };
            inputs.push(TankInput {
                tank,
                stick,
                reading: entry.reading,
                estimate_kg: entry.estimate,
                empty: entry.empty,
            });
        }

        Ok((Attitude { pitch, roll }, inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> Selection {
        Selection {
            pitch: Some("K (0)".to_string()),
            roll: Some(10.0),
            wing_stick: Some("Stick 6".to_string()),
            center_stick: Some("Stick 3".to_string()),
        }
    }

    #[test]
    fn test_parse_and_resolve() {
        let sheet = DipSheet::from_toml(
            r#"
roll = 2.5

[left]
stick = "Stick 7"
reading = 5.0
estimate = 4000

[center]
reading = 3.5

[right]
empty = true
"#,
        )
        .unwrap();

        let (attitude, inputs) = sheet.resolve(&selection()).unwrap();
        assert_eq!(attitude.pitch, "K (0)");
        assert_eq!(attitude.roll, 2.5);
        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[0].stick, "Stick 7");
        assert_eq!(inputs[0].estimate_kg, 4000.0);
        assert_eq!(inputs[1].stick, "Stick 3");
        assert_eq!(inputs[1].estimate_kg, 0.0);
        assert!(inputs[2].empty);
        assert_eq!(inputs[2].stick, "Stick 6");
    }

    #[test]
    fn test_missing_sections_are_skipped() {
        let sheet = DipSheet::from_toml("[center]\nreading = 3.5\n").unwrap();
        let (_, inputs) = sheet.resolve(&selection()).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].tank, TankId::Center);
    }

    #[test]
    fn test_no_defaults_available() {
        let sheet = DipSheet::from_toml("[left]\nreading = 1.0\n").unwrap();
        let none = Selection {
            pitch: None,
            roll: None,
            wing_stick: None,
            center_stick: None,
        };
        assert!(matches!(sheet.resolve(&none), Err(Error::Sheet(_))));

        let sheet =
            DipSheet::from_toml("pitch = \"K\"\nroll = 0.0\n[left]\nreading = 1.0\n").unwrap();
        assert!(matches!(sheet.resolve(&none), Err(Error::Sheet(_))));

        let sheet =
            DipSheet::from_toml("pitch = \"K\"\nroll = 0.0\n[left]\nempty = true\n").unwrap();
        assert!(sheet.resolve(&none).is_ok());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = DipSheet::from_toml("[left]\nreadng = 1.0\n").unwrap_err();
        assert!(matches!(err, Error::Sheet(_)));
    }
}
