//! Reference data importers
//!
//! Both importers turn a file into `(density, temperature, vcf)` entries plus
//! a list of rows that could not be used. Nothing here touches the table;
//! loading is the caller's job so it can happen under one write lock.

mod csv_rows;
mod sql_dump;

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use vcf_domain::model::ReferenceEntry;

pub use csv_rows::parse_csv;
pub use sql_dump::{parse_sql_dump, RowShape};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid import pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Import file not found: {0}")]
    NotFound(String),
}

impl From<ImportError> for vcf_types::Error {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::NotFound(path) => vcf_types::Error::FileNotFound(path),
            ImportError::IoError(e) => vcf_types::Error::Io(e),
            other => vcf_types::Error::Import(other.to_string()),
        }
    }
}

/// Source file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    /// `INSERT INTO ... VALUES (...), (...);` statements
    Sql,
    /// `density,temperature,vcf` lines
    Csv,
}

impl ImportFormat {
    /// `.csv` files are CSV, anything else is treated as a SQL dump
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ImportFormat::Csv,
            _ => ImportFormat::Sql,
        }
    }
}

impl std::fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportFormat::Sql => write!(f, "sql"),
            ImportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// A row that was skipped, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub raw: String,
    pub reason: String,
}

/// Rows extracted from one import file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedRows {
    /// INSERT statements found (SQL only)
    pub statements: usize,
    /// Value tuples or CSV lines examined
    pub rows: usize,
    pub entries: Vec<ReferenceEntry>,
    pub skipped: Vec<SkippedRow>,
}

impl ParsedRows {
    fn skip(&mut self, raw: impl Into<String>, reason: impl Into<String>) {
        let row = SkippedRow {
            raw: raw.into(),
            reason: reason.into(),
        };
        warn!(raw = %row.raw, reason = %row.reason, "skipping invalid data");
        self.skipped.push(row);
    }
}

/// Read and parse an import file in the given format
pub fn parse_file(path: &Path, format: ImportFormat) -> Result<ParsedRows, ImportError> {
    if !path.exists() {
        return Err(ImportError::NotFound(path.display().to_string()));
    }

    match format {
        ImportFormat::Sql => {
            let bytes = fs::read(path)?;
            let content = String::from_utf8_lossy(&bytes);
            if matches!(content, Cow::Owned(_)) {
                warn!(path = %path.display(), "import file is not valid UTF-8; invalid bytes replaced");
            }
            parse_sql_dump(&content)
        }
        ImportFormat::Csv => parse_csv(fs::File::open(path)?),
    }
}

/// Parse one numeric field: surrounding whitespace and single quotes removed,
/// finite values only
fn parse_number(field: &str) -> Result<f64, String> {
    let cleaned = field.trim().trim_matches('\'').trim();
    let value: f64 = cleaned
        .parse()
        .map_err(|_| format!("could not convert '{}' to a number", cleaned))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("non-finite value '{}'", cleaned))
    }
}
