//! Reference table store
//!
//! An in-memory, lock-guarded VCF reference table with an optional JSON
//! snapshot on disk.

mod reference_table;

pub use reference_table::{BulkLoadSummary, ReferenceTable, SNAPSHOT_FILE};
