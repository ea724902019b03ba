//! VCF resolution: grid rounding, exact lookup, neighborhood fallback, default
//!
//! A miss never fails. When neither the rounded point nor its neighborhood
//! has an entry the resolver answers [`DEFAULT_VCF`] (1.0), so an incomplete
//! reference table silently yields an uncorrected tonnage. Callers that need
//! to tell the cases apart inspect [`VcfResolution::source`].

use serde::{Deserialize, Serialize};
use tracing::debug;
use vcf_types::DEFAULT_VCF;

use crate::repository::ReferenceLookup;
use crate::service::grid::GridPoint;

/// Where a resolved VCF came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VcfSource {
    /// Entry at the rounded grid point
    Exact,
    /// Entry inside the neighborhood box, at the given coordinates
    Neighborhood { density: f64, temperature: f64 },
    /// No entry found; [`DEFAULT_VCF`] used
    Default,
}

impl VcfSource {
    pub fn label(&self) -> &'static str {
        match self {
            VcfSource::Exact => "exact",
            VcfSource::Neighborhood { .. } => "neighborhood",
            VcfSource::Default => "default",
        }
    }
}

/// Outcome of resolving a VCF for one measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VcfResolution {
    pub vcf: f64,
    /// Grid point used for the lookup
    pub point: GridPoint,
    pub source: VcfSource,
}

/// Maps raw (density, temperature) measurements to a VCF using a reference table
pub struct VcfResolver<'a, L: ReferenceLookup + ?Sized> {
    table: &'a L,
}

impl<'a, L: ReferenceLookup + ?Sized> VcfResolver<'a, L> {
    pub fn new(table: &'a L) -> Self {
        Self { table }
    }

    /// Resolve and report the grid point and match source
    pub fn resolve(&self, density: f64, temperature: f64) -> VcfResolution {
        let point = GridPoint::snap(density, temperature);

        if let Some(vcf) = self.table.exact_lookup(point.density, point.temperature) {
            debug!(
                density = point.density,
                temperature = point.temperature,
                vcf,
                "exact VCF match"
            );
            return VcfResolution {
                vcf,
                point,
                source: VcfSource::Exact,
            };
        }

        if let Some(entry) = self
            .table
            .neighborhood_entry(point.density, point.temperature)
        {
            debug!(
                density = point.density,
                temperature = point.temperature,
                matched_density = entry.density,
                matched_temperature = entry.temperature,
                vcf = entry.vcf,
                "neighborhood VCF match"
            );
            return VcfResolution {
                vcf: entry.vcf,
                point,
                source: VcfSource::Neighborhood {
                    density: entry.density,
                    temperature: entry.temperature,
                },
            };
        }

        debug!(
            density = point.density,
            temperature = point.temperature,
            "no VCF entry, using default"
        );
        VcfResolution {
            vcf: DEFAULT_VCF,
            point,
            source: VcfSource::Default,
        }
    }

    /// Resolve the VCF only
    pub fn resolve_vcf(&self, density: f64, temperature: f64) -> f64 {
        self.resolve(density, temperature).vcf
    }
}
