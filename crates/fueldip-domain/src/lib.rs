//! Fuel dip domain layer: reference data model and the lookup-and-reconciliation services

pub mod model;
pub mod repository;
pub mod service;
