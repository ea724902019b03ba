//! Import Service - load reference data files into the reference table
//!
//! The whole file is parsed before the table is touched. The optional clear
//! and all inserts then happen in one bulk load, and the snapshot is saved
//! if the table has one.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use vcf_infra::import::{parse_file, ImportFormat, SkippedRow};
use vcf_store::ReferenceTable;
use vcf_types::Result;

/// Options for an import run
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Remove all existing entries before loading
    pub clear: bool,

    /// Force a format instead of guessing from the file extension
    pub format: Option<ImportFormat>,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn with_format(mut self, format: ImportFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Outcome of one import
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub path: PathBuf,
    pub format: ImportFormat,
    /// INSERT statements found (SQL only)
    pub statements: usize,
    /// Value tuples or CSV lines examined
    pub rows: usize,
    /// Entries removed by clear
    pub cleared: usize,
    pub inserted: usize,
    /// Rows whose key already existed; first value kept
    pub duplicates: usize,
    pub skipped: Vec<SkippedRow>,
    /// Table size after the import
    pub total_entries: usize,
}

impl ImportReport {
    /// Rows accepted by the table, new or duplicate
    pub fn imported(&self) -> usize {
        self.inserted + self.duplicates
    }
}

/// Import a SQL dump or CSV file into `table`
pub fn import_reference_data(
    table: &ReferenceTable,
    path: &Path,
    options: &ImportOptions,
) -> Result<ImportReport> {
    let format = options
        .format
        .unwrap_or_else(|| ImportFormat::from_path(path));
    info!(path = %path.display(), ?format, clear = options.clear, "importing reference data");

    let mut parsed = parse_file(path, format)?;
    let summary = table.bulk_load(parsed.entries.drain(..), options.clear);

    if table.snapshot_path().is_some() {
        table.save()?;
    }

    let report = ImportReport {
        path: path.to_path_buf(),
        format,
        statements: parsed.statements,
        rows: parsed.rows,
        cleared: summary.cleared,
        inserted: summary.inserted,
        duplicates: summary.duplicates,
        skipped: parsed.skipped,
        total_entries: table.len(),
    };
    info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        skipped = report.skipped.len(),
        total = report.total_entries,
        "import finished"
    );
    Ok(report)
}
