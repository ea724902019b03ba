//! Repository adapters for persistence layer

use std::path::PathBuf;

use vcf_infra::persistence::FileCalculationHistoryRepository;
use vcf_store::ReferenceTable;
use vcf_types::Result;

use crate::config::Config;

/// Open the reference table snapshot
pub fn open_reference_table(config: &Config) -> Result<ReferenceTable> {
    open_reference_table_at(config.store_dir()?)
}

/// Open the file-based calculation history
pub fn open_history_repo(config: &Config) -> Result<FileCalculationHistoryRepository> {
    open_history_repo_at(config.store_dir()?)
}

/// Open the reference table snapshot in a custom directory
pub fn open_reference_table_at(store_dir: PathBuf) -> Result<ReferenceTable> {
    ReferenceTable::open(store_dir)
}

/// Open the calculation history in a custom directory
pub fn open_history_repo_at(store_dir: PathBuf) -> Result<FileCalculationHistoryRepository> {
    FileCalculationHistoryRepository::open(store_dir)
}
