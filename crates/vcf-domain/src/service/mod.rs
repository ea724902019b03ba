//! Domain services

pub mod grid;
pub mod tonnage_calculator;
pub mod vcf_resolver;

pub use grid::{pick_neighbor, round_to_grid, GridPoint};
pub use tonnage_calculator::{tonnage, TonnageCalculation, TonnageCalculator};
pub use vcf_resolver::{VcfResolution, VcfResolver, VcfSource};
