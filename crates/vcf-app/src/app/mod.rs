//! Application use cases

pub mod calculation_service;
pub mod import_service;
pub mod query_service;

pub use calculation_service::{
    calculate, calculate_and_record, round_decimals, CalculationInput, CalculationResponse,
    CalculationServiceError,
};
pub use import_service::{import_reference_data, ImportOptions, ImportReport};
pub use query_service::{
    recent_calculations, search_history, HistoryPage, HistoryQuery, QueryServiceError, SortField,
    SortOrder, RECENT_LIMIT,
};
