use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::tonnage_calculator::TonnageCalculation;

/// A completed tonnage calculation.
///
/// `tonnage == volume * density * vcf / 1000` holds when the record is
/// created; the record is never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: Uuid,
    /// Litres
    pub volume: f64,
    /// kg/m³
    pub density: f64,
    /// °C
    pub temperature: f64,
    /// VCF the engine returned
    pub vcf: f64,
    /// Metric tonnes
    pub tonnage: f64,
    pub created_at: DateTime<Utc>,
}

impl CalculationRecord {
    /// Record a calculation stamped with the current time
    pub fn from_calculation(calculation: &TonnageCalculation) -> Self {
        Self::at(calculation, Utc::now())
    }

    /// Record a calculation with an explicit creation time
    pub fn at(calculation: &TonnageCalculation, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            volume: calculation.volume,
            density: calculation.density,
            temperature: calculation.temperature,
            vcf: calculation.vcf,
            tonnage: calculation.tonnage,
            created_at,
        }
    }
}

impl std::fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.3} MT - {}",
            self.tonnage,
            self.created_at.format("%Y-%m-%d %H:%M")
        )
    }
}
