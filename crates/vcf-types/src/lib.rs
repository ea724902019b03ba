//! Core types for VCF tonnage calculation

mod error;
mod page;

pub use error::*;
pub use page::Page;

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

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Grid step for density lookups (kg/m³)
pub const DENSITY_STEP: f64 = 0.5;

/// Grid step for temperature lookups (°C)
pub const TEMPERATURE_STEP: f64 = 0.25;

/// VCF returned when the reference table has no usable entry
pub const DEFAULT_VCF: f64 = 1.0;

/// Lowest accepted temperature (°C)
pub const MIN_TEMPERATURE: f64 = -50.0;

/// Highest accepted temperature (°C)
pub const MAX_TEMPERATURE: f64 = 150.0;
