//! Core types for fuel-dip calculations

mod error;
mod types;

pub use error::*;
pub use types::*;
