use serde::{Deserialize, Serialize};

/// One calibration point of the VCF reference table.
///
/// `density` (kg/m³) sits on the 0.5 grid and `temperature` (°C) on the
/// 0.25 grid. The pair is unique within a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub density: f64,
    pub temperature: f64,
    pub vcf: f64,
}

impl ReferenceEntry {
    pub fn new(density: f64, temperature: f64, vcf: f64) -> Self {
        Self {
            density,
            temperature,
            vcf,
        }
    }

    /// All three values are finite numbers
    pub fn is_finite(&self) -> bool {
        self.density.is_finite() && self.temperature.is_finite() && self.vcf.is_finite()
    }
}

impl From<(f64, f64, f64)> for ReferenceEntry {
    fn from((density, temperature, vcf): (f64, f64, f64)) -> Self {
        Self::new(density, temperature, vcf)
    }
}

impl std::fmt::Display for ReferenceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Density: {:?} kg/m³, Temp: {:?}°C, VCF: {:?}",
            self.density, self.temperature, self.vcf
        )
    }
}
