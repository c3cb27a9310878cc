//! Application use cases

pub mod dip_service;

pub use dip_service::{compute_tank, Attitude, CalcReport, DipSession, TankInput, TankReport};
