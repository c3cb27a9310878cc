use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Wing side column of the calibration table (`Wing_Side`)
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    ValueEnum,
    Serialize,
    Deserialize,
)]
pub enum WingSide {
    #[default]
    Left,
    Right,
}

impl WingSide {
    /// Label as stored in the reference data
    pub fn label(&self) -> &'static str {
        match self {
            WingSide::Left => "Left",
            WingSide::Right => "Right",
        }
    }
}

impl fmt::Display for WingSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WingSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Left" => Ok(WingSide::Left),
            "Right" => Ok(WingSide::Right),
            other => Err(format!("unknown wing side: {:?}", other)),
        }
    }
}

/// Tank class, which decides the variance tolerance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankClass {
    Wing,
    Center,
}

impl TankClass {
    /// Recommendation table scope for this class
    pub fn scope(&self) -> TankScope {
        match self {
            TankClass::Wing => TankScope::MainWingTank,
            TankClass::Center => TankScope::CenterTank,
        }
    }
}

impl fmt::Display for TankClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TankClass::Wing => write!(f, "wing"),
            TankClass::Center => write!(f, "center"),
        }
    }
}

/// `Tank_Scope` column of the recommendation table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum TankScope {
    #[value(name = "wing", alias = "main-wing-tank")]
    #[serde(rename = "Main Wing Tank")]
    MainWingTank,
    #[value(name = "center", alias = "center-tank")]
    #[serde(rename = "Center Tank")]
    CenterTank,
}

impl TankScope {
    /// Label as stored in the reference data
    pub fn label(&self) -> &'static str {
        match self {
            TankScope::MainWingTank => "Main Wing Tank",
            TankScope::CenterTank => "Center Tank",
        }
    }
}

impl fmt::Display for TankScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TankScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Main Wing Tank" => Ok(TankScope::MainWingTank),
            "Center Tank" => Ok(TankScope::CenterTank),
            other => Err(format!("unknown tank scope: {:?}", other)),
        }
    }
}

/// One of the three fuel tanks
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TankId {
    Left,
    Center,
    Right,
}

impl TankId {
    /// All tanks in display order
    pub const ALL: [TankId; 3] = [TankId::Left, TankId::Center, TankId::Right];

    pub fn class(&self) -> TankClass {
        match self {
            TankId::Left | TankId::Right => TankClass::Wing,
            TankId::Center => TankClass::Center,
        }
    }

    /// Physical wing side, `None` for the center tank
    pub fn wing_side(&self) -> Option<WingSide> {
        match self {
            TankId::Left => Some(WingSide::Left),
            TankId::Right => Some(WingSide::Right),
            TankId::Center => None,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            TankId::Left => 0,
            TankId::Center => 1,
            TankId::Right => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TankId::Left => "Left Wing",
            TankId::Center => "Center",
            TankId::Right => "Right Wing",
        }
    }
}

impl fmt::Display for TankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-size storage indexed by tank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerTank<T> {
    slots: [T; 3],
}

impl<T> PerTank<T> {
    pub fn from_fn(mut f: impl FnMut(TankId) -> T) -> Self {
        Self {
            slots: TankId::ALL.map(&mut f),
        }
    }

    pub fn get(&self, tank: TankId) -> &T {
        &self.slots[tank.index()]
    }

    pub fn get_mut(&mut self, tank: TankId) -> &mut T {
        &mut self.slots[tank.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TankId, &T)> {
        TankId::ALL.into_iter().zip(self.slots.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tank_classes() {
        assert_eq!(TankId::Left.class(), TankClass::Wing);
        assert_eq!(TankId::Right.class(), TankClass::Wing);
        assert_eq!(TankId::Center.class(), TankClass::Center);
        assert_eq!(TankClass::Center.scope(), TankScope::CenterTank);
        assert_eq!(TankClass::Wing.scope().label(), "Main Wing Tank");
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Left".parse::<WingSide>().unwrap(), WingSide::Left);
        assert_eq!(" Right ".parse::<WingSide>().unwrap(), WingSide::Right);
        assert!("left".parse::<WingSide>().is_err());
        assert_eq!(
            "Center Tank".parse::<TankScope>().unwrap(),
            TankScope::CenterTank
        );
        assert!("Aux Tank".parse::<TankScope>().is_err());
    }

    #[test]
    fn test_per_tank_indexing() {
        let mut slots = PerTank::from_fn(|tank| tank.label().len());
        *slots.get_mut(TankId::Center) = 0;
        assert_eq!(*slots.get(TankId::Left), "Left Wing".len());
        assert_eq!(*slots.get(TankId::Center), 0);
        let order: Vec<TankId> = slots.iter().map(|(t, _)| t).collect();
        assert_eq!(order, TankId::ALL.to_vec());
    }
}
