//! Domain model types

pub mod calculation_record;
pub mod reference_entry;

pub use calculation_record::CalculationRecord;
pub use reference_entry::ReferenceEntry;
