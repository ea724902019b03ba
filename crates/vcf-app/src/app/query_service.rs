//! Query Service - read access to calculation history
//!
//! Search, sort and pagination over stored calculations.

use std::cmp::Ordering;

use serde::Serialize;
use thiserror::Error;

use vcf_domain::model::CalculationRecord;
use vcf_domain::repository::CalculationHistoryRepository;
use vcf_types::{Error, Page};

/// Calculations shown by [`recent_calculations`]
pub const RECENT_LIMIT: usize = 5;

/// Errors specific to the query service
#[derive(Debug, Error)]
pub enum QueryServiceError {
    #[error("Store not accessible: {0}")]
    StoreError(String),
}

impl From<Error> for QueryServiceError {
    fn from(err: Error) -> Self {
        QueryServiceError::StoreError(err.to_string())
    }
}

impl From<QueryServiceError> for Error {
    fn from(err: QueryServiceError) -> Self {
        match err {
            QueryServiceError::StoreError(msg) => Error::Store(msg),
        }
    }
}

/// Sortable history column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Volume,
    Density,
    Temperature,
    Vcf,
    Tonnage,
    CreatedAt,
}

impl SortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "volume" => Some(SortField::Volume),
            "density" => Some(SortField::Density),
            "temperature" => Some(SortField::Temperature),
            "vcf" => Some(SortField::Vcf),
            "tonnage" => Some(SortField::Tonnage),
            "created_at" => Some(SortField::CreatedAt),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SortField::Volume => "volume",
            SortField::Density => "density",
            SortField::Temperature => "temperature",
            SortField::Vcf => "vcf",
            SortField::Tonnage => "tonnage",
            SortField::CreatedAt => "created_at",
        }
    }

    fn compare(&self, a: &CalculationRecord, b: &CalculationRecord) -> Ordering {
        match self {
            SortField::Volume => a.volume.total_cmp(&b.volume),
            SortField::Density => a.density.total_cmp(&b.density),
            SortField::Temperature => a.temperature.total_cmp(&b.temperature),
            SortField::Vcf => a.vcf.total_cmp(&b.vcf),
            SortField::Tonnage => a.tonnage.total_cmp(&b.tonnage),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

/// Sort key, written `field` or `-field` for descending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub descending: bool,
}

impl SortOrder {
    /// Parse `field` / `-field`; unknown keys give `None`
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        let (descending, name) = match key.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, key),
        };
        SortField::parse(name).map(|field| Self { field, descending })
    }

    fn sort(&self, records: &mut [CalculationRecord]) {
        records.sort_by(|a, b| {
            let ord = self.field.compare(a, b);
            if self.descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }
}

impl Default for SortOrder {
    /// Newest first
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            descending: true,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.descending {
            write!(f, "-")?;
        }
        write!(f, "{}", self.field.name())
    }
}

/// History listing request
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub search: Option<String>,
    /// `field` or `-field`; unknown keys fall back to newest first
    pub sort: Option<String>,
    pub page: Option<usize>,
}

/// One page of history plus the effective query
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    pub page: Page<CalculationRecord>,
    pub search: String,
    pub sort: String,
}

/// Case-insensitive substring match on the textual volume, density,
/// temperature or tonnage
fn matches_search(record: &CalculationRecord, term: &str) -> bool {
    [
        record.volume,
        record.density,
        record.temperature,
        record.tonnage,
    ]
    .iter()
    .any(|value| format!("{:?}", value).to_lowercase().contains(term))
}

/// Search, sort and paginate the calculation history
pub fn search_history<H>(
    repo: &H,
    query: &HistoryQuery,
    per_page: usize,
) -> Result<HistoryPage, QueryServiceError>
where
    H: CalculationHistoryRepository + ?Sized,
{
    let mut records = repo.find_all()?;

    let search = query.search.as_deref().unwrap_or("").trim().to_string();
    if !search.is_empty() {
        let term = search.to_lowercase();
        records.retain(|r| matches_search(r, &term));
    }

    let order = query
        .sort
        .as_deref()
        .and_then(SortOrder::parse)
        .unwrap_or_default();
    order.sort(&mut records);

    Ok(HistoryPage {
        page: Page::paginate(records, query.page, per_page),
        search,
        sort: order.to_string(),
    })
}

/// The most recent calculations, newest first
pub fn recent_calculations<H>(
    repo: &H,
    limit: usize,
) -> Result<Vec<CalculationRecord>, QueryServiceError>
where
    H: CalculationHistoryRepository + ?Sized,
{
    let mut records = repo.find_all()?;
    SortOrder::default().sort(&mut records);
    records.truncate(limit);
    Ok(records)
}
