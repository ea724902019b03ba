//! Persistence implementations
//!
//! File-based implementations of the domain repository traits.

mod file_calculation_history_repo;

pub use file_calculation_history_repo::{FileCalculationHistoryRepository, HISTORY_FILE};
