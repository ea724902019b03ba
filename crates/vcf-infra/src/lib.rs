//! Infrastructure layer - reference data importers and file persistence

pub mod import;
pub mod persistence;
