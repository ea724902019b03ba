//! Calculation Service - validated tonnage calculation
//!
//! The domain calculator accepts any numbers. This service is the caller
//! that validates user input before computing and recording:
//! 1. Reject non-finite or out-of-range input
//! 2. Resolve the VCF and compute tonnage
//! 3. Store a calculation record (optional)

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use vcf_domain::model::CalculationRecord;
use vcf_domain::repository::{CalculationHistoryRepository, ReferenceLookup};
use vcf_domain::service::{TonnageCalculation, TonnageCalculator};
use vcf_types::{Error, MAX_TEMPERATURE, MIN_TEMPERATURE};

/// Errors specific to the calculation service
#[derive(Debug, Error)]
pub enum CalculationServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    StoreError(String),
}

impl From<Error> for CalculationServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => CalculationServiceError::InvalidInput(msg),
            other => CalculationServiceError::StoreError(other.to_string()),
        }
    }
}

impl From<CalculationServiceError> for Error {
    fn from(err: CalculationServiceError) -> Self {
        match err {
            CalculationServiceError::InvalidInput(msg) => Error::InvalidInput(msg),
            CalculationServiceError::StoreError(msg) => Error::Store(msg),
        }
    }
}

/// Raw user input for one calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationInput {
    /// Litres
    pub volume: f64,
    /// kg/m³
    pub density: f64,
    /// °C
    pub temperature: f64,
}

impl CalculationInput {
    pub fn new(volume: f64, density: f64, temperature: f64) -> Self {
        Self {
            volume,
            density,
            temperature,
        }
    }

    /// Check ranges: volume > 0, density > 0, -50 <= temperature <= 150
    pub fn validate(&self) -> Result<(), CalculationServiceError> {
        if !(self.volume.is_finite() && self.density.is_finite() && self.temperature.is_finite())
        {
            return Err(CalculationServiceError::InvalidInput(
                "Invalid input values".to_string(),
            ));
        }

        let mut problems = Vec::new();
        if self.volume <= 0.0 {
            problems.push("Volume must be greater than 0");
        }
        if self.density <= 0.0 {
            problems.push("Density must be greater than 0");
        }
        if self.temperature < MIN_TEMPERATURE || self.temperature > MAX_TEMPERATURE {
            problems.push("Temperature must be between -50°C and 150°C");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CalculationServiceError::InvalidInput(problems.join("; ")))
        }
    }
}

/// Validate and calculate without recording
pub fn calculate<L>(
    table: &L,
    input: CalculationInput,
) -> Result<TonnageCalculation, CalculationServiceError>
where
    L: ReferenceLookup + ?Sized,
{
    input.validate()?;
    Ok(TonnageCalculator::new(table).calculate(input.volume, input.density, input.temperature))
}

/// Validate, calculate, and store a calculation record
pub fn calculate_and_record<L, H>(
    table: &L,
    history: &H,
    input: CalculationInput,
) -> Result<(TonnageCalculation, CalculationRecord), CalculationServiceError>
where
    L: ReferenceLookup + ?Sized,
    H: CalculationHistoryRepository + ?Sized,
{
    let calculation = calculate(table, input)?;
    let record = CalculationRecord::from_calculation(&calculation);
    history.save(&record)?;
    info!(
        id = %record.id,
        tonnage = record.tonnage,
        vcf = record.vcf,
        source = calculation.source.label(),
        "calculation recorded"
    );
    Ok((calculation, record))
}

/// Round for display, half-to-even on the decimal representation
pub fn round_decimals(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// JSON response shape of a calculation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tonnage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcf: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounded_density: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounded_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcf_source: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculationResponse {
    pub fn success(
        calculation: &TonnageCalculation,
        tonnage_decimals: usize,
        vcf_decimals: usize,
    ) -> Self {
        Self {
            success: true,
            tonnage: Some(round_decimals(calculation.tonnage, tonnage_decimals)),
            vcf: Some(round_decimals(calculation.vcf, vcf_decimals)),
            rounded_density: Some(calculation.point.density),
            rounded_temperature: Some(calculation.point.temperature),
            vcf_source: Some(calculation.source.label()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            tonnage: None,
            vcf: None,
            rounded_density: None,
            rounded_temperature: None,
            vcf_source: None,
            error: Some(message.into()),
        }
    }
}
