//! Repository trait definitions for reference data and calculation history

use uuid::Uuid;

use crate::model::{CalculationRecord, ReferenceEntry};
use vcf_types::Error;

/// Read access to a VCF reference table.
///
/// Implementors answer point and neighborhood queries; the rounding and
/// fallback policy lives in [`crate::service::vcf_resolver`].
pub trait ReferenceLookup {
    /// VCF of the entry whose coordinates equal the given values exactly.
    /// Callers pre-round to the grid.
    fn exact_lookup(&self, density: f64, temperature: f64) -> Option<f64>;

    /// Entry chosen from the ±0.5 density / ±0.25 temperature box around the
    /// given point, using [`crate::service::grid::pick_neighbor`] ordering.
    fn neighborhood_entry(&self, density: f64, temperature: f64) -> Option<ReferenceEntry>;

    /// VCF of [`Self::neighborhood_entry`]
    fn neighborhood_lookup(&self, density: f64, temperature: f64) -> Option<f64> {
        self.neighborhood_entry(density, temperature)
            .map(|entry| entry.vcf)
    }
}

impl<T: ReferenceLookup + ?Sized> ReferenceLookup for &T {
    fn exact_lookup(&self, density: f64, temperature: f64) -> Option<f64> {
        (**self).exact_lookup(density, temperature)
    }

    fn neighborhood_entry(&self, density: f64, temperature: f64) -> Option<ReferenceEntry> {
        (**self).neighborhood_entry(density, temperature)
    }
}

/// Repository for completed calculations
pub trait CalculationHistoryRepository {
    /// Save a calculation record
    fn save(&self, record: &CalculationRecord) -> Result<(), Error>;

    /// Find a record by its id
    fn find_by_id(&self, id: Uuid) -> Result<Option<CalculationRecord>, Error>;

    /// Find all records, newest first
    fn find_all(&self) -> Result<Vec<CalculationRecord>, Error>;
}
