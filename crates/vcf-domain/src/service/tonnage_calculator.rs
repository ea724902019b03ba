//! Tonnage calculation: `volume * density * vcf / 1000`
//!
//! No validation and no rounding happen here. Range checks belong to the
//! caller and display rounding to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::repository::ReferenceLookup;
use crate::service::grid::GridPoint;
use crate::service::vcf_resolver::{VcfResolver, VcfSource};

/// Tonnage (MT) for a volume in litres, density in kg/m³ and a VCF
pub fn tonnage(volume: f64, density: f64, vcf: f64) -> f64 {
    volume * density * vcf / 1000.0
}

/// Full result of one calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TonnageCalculation {
    pub volume: f64,
    pub density: f64,
    pub temperature: f64,
    pub vcf: f64,
    pub tonnage: f64,
    /// Grid point the VCF was looked up at
    pub point: GridPoint,
    pub source: VcfSource,
}

pub struct TonnageCalculator<'a, L: ReferenceLookup + ?Sized> {
    resolver: VcfResolver<'a, L>,
}

impl<'a, L: ReferenceLookup + ?Sized> TonnageCalculator<'a, L> {
    pub fn new(table: &'a L) -> Self {
        Self {
            resolver: VcfResolver::new(table),
        }
    }

    /// Returns `(tonnage, vcf_used)`
    pub fn compute(&self, volume: f64, density: f64, temperature: f64) -> (f64, f64) {
        let vcf = self.resolver.resolve_vcf(density, temperature);
        (tonnage(volume, density, vcf), vcf)
    }

    pub fn calculate(&self, volume: f64, density: f64, temperature: f64) -> TonnageCalculation {
        let resolution = self.resolver.resolve(density, temperature);
        TonnageCalculation {
            volume,
            density,
            temperature,
            vcf: resolution.vcf,
            tonnage: tonnage(volume, density, resolution.vcf),
            point: resolution.point,
            source: resolution.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReferenceEntry;

    struct FixedTable(Option<ReferenceEntry>);

    impl ReferenceLookup for FixedTable {
        fn exact_lookup(&self, density: f64, temperature: f64) -> Option<f64> {
            self.0
                .filter(|e| e.density == density && e.temperature == temperature)
                .map(|e| e.vcf)
        }

        fn neighborhood_entry(&self, _density: f64, _temperature: f64) -> Option<ReferenceEntry> {
            None
        }
    }

    #[test]
    fn test_formula() {
        assert!((tonnage(1000.0, 850.0, 0.95) - 807.5).abs() < 1e-9);
        assert!((tonnage(0.0, 850.0, 0.95) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compute_with_table_vcf() {
        let table = FixedTable(Some(ReferenceEntry::new(850.0, 20.0, 0.95)));
        let (tonnage, vcf) = TonnageCalculator::new(&table).compute(1000.0, 850.0, 20.0);
        assert_eq!(vcf, 0.95);
        assert!((tonnage - 807.5).abs() < 1e-9);
    }

    #[test]
    fn test_compute_without_data_uses_unit_vcf() {
        let table = FixedTable(None);
        let (tonnage, vcf) = TonnageCalculator::new(&table).compute(5000.0, 820.0, 15.0);
        assert_eq!(vcf, 1.0);
        assert!((tonnage - 4100.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_reports_rounded_point() {
        let table = FixedTable(Some(ReferenceEntry::new(850.5, 20.25, 0.9912)));
        let calc = TonnageCalculator::new(&table).calculate(2000.0, 850.6, 20.3);
        assert_eq!(calc.point.density, 850.5);
        assert_eq!(calc.point.temperature, 20.25);
        assert_eq!(calc.source, VcfSource::Exact);
        // unrounded density feeds the formula
        assert!((calc.tonnage - 2000.0 * 850.6 * 0.9912 / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_input_is_not_rejected() {
        let table = FixedTable(None);
        let (tonnage, vcf) = TonnageCalculator::new(&table).compute(-10.0, 800.0, 400.0);
        assert_eq!(vcf, 1.0);
        assert!((tonnage + 8.0).abs() < 1e-9);
    }
}
