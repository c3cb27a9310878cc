//! Application service layer - config, operator sheets, dip sessions

pub mod app;
pub mod config;
pub mod repository;
pub mod sheet;
