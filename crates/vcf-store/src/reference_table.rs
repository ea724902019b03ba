//! Lock-guarded VCF reference table

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::{debug, info, warn};

use vcf_domain::model::ReferenceEntry;
use vcf_domain::repository::ReferenceLookup;
use vcf_domain::service::{pick_neighbor, GridPoint};
use vcf_types::{Error, Page, Result, DENSITY_STEP};

/// Snapshot file name inside the store directory
pub const SNAPSHOT_FILE: &str = "reference_table.json";

/// Map key ordered by density, then temperature
#[derive(Debug, Clone, Copy)]
struct GridKey {
    density: f64,
    temperature: f64,
}

impl GridKey {
    fn new(density: f64, temperature: f64) -> Self {
        // -0.0 and 0.0 must key the same entry
        Self {
            density: density + 0.0,
            temperature: temperature + 0.0,
        }
    }
}

impl PartialEq for GridKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GridKey {}

impl PartialOrd for GridKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GridKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.density
            .total_cmp(&other.density)
            .then_with(|| self.temperature.total_cmp(&other.temperature))
    }
}

type Entries = BTreeMap<GridKey, f64>;

/// Counts from one [`ReferenceTable::bulk_load`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkLoadSummary {
    /// Entries removed by replace-all
    pub cleared: usize,
    pub inserted: usize,
    /// Keys already present; existing value kept
    pub duplicates: usize,
    /// Entries with non-finite values
    pub rejected: usize,
}

/// VCF reference table.
///
/// Keys are unique and first write wins: inserting an existing
/// (density, temperature) pair leaves the stored VCF untouched. Lookups
/// share a read lock; every mutation, including a whole bulk load, runs
/// under one write lock, so readers never see a half-loaded table.
#[derive(Debug, Default)]
pub struct ReferenceTable {
    entries: RwLock<Entries>,
    snapshot_path: Option<PathBuf>,
}

impl ReferenceTable {
    /// Empty in-memory table without a snapshot file
    pub fn new() -> Self {
        Self::default()
    }

    /// In-memory table populated from `entries`
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ReferenceEntry>,
    {
        let table = Self::new();
        table.bulk_load(entries, false);
        table
    }

    /// Create or load a table backed by `store_dir/reference_table.json`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let snapshot_path = store_dir.join(SNAPSHOT_FILE);

        let mut entries = Entries::new();
        if snapshot_path.exists() {
            let file = File::open(&snapshot_path)?;
            let reader = BufReader::new(file);
            let stored: Vec<ReferenceEntry> = serde_json::from_reader(reader)?;
            let summary = insert_all(&mut entries, stored);
            if summary.duplicates > 0 || summary.rejected > 0 {
                warn!(
                    path = %snapshot_path.display(),
                    duplicates = summary.duplicates,
                    rejected = summary.rejected,
                    "reference snapshot contained unusable rows"
                );
            }
            info!(
                path = %snapshot_path.display(),
                entries = entries.len(),
                "loaded reference table"
            );
        }

        Ok(Self {
            entries: RwLock::new(entries),
            snapshot_path: Some(snapshot_path),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Write the current entries to the snapshot file
    pub fn save(&self) -> Result<()> {
        let path = self
            .snapshot_path
            .as_ref()
            .ok_or_else(|| Error::Store("reference table has no snapshot file".to_string()))?;

        let entries = self.entries();
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &entries)?;
        debug!(path = %path.display(), entries = entries.len(), "saved reference table");
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert an entry unless its key already exists.
    ///
    /// Returns `true` when the entry was inserted. Duplicates and entries with
    /// non-finite values are ignored.
    pub fn upsert(&self, density: f64, temperature: f64, vcf: f64) -> bool {
        let entry = ReferenceEntry::new(density, temperature, vcf);
        insert_if_absent(&mut self.write(), entry) == Insert::Inserted
    }

    /// Insert many entries under a single write lock.
    ///
    /// With `replace_all` the table is cleared first, inside the same lock.
    pub fn bulk_load<I>(&self, entries: I, replace_all: bool) -> BulkLoadSummary
    where
        I: IntoIterator<Item = ReferenceEntry>,
    {
        let mut guard = self.write();
        let cleared = if replace_all {
            let count = guard.len();
            guard.clear();
            count
        } else {
            0
        };

        let summary = BulkLoadSummary {
            cleared,
            ..insert_all(&mut guard, entries)
        };
        info!(
            cleared = summary.cleared,
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            rejected = summary.rejected,
            total = guard.len(),
            "bulk load finished"
        );
        summary
    }

    /// Remove all entries
    pub fn clear(&self) {
        let mut guard = self.write();
        let count = guard.len();
        guard.clear();
        info!(removed = count, "cleared reference table");
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// All entries ordered by density, then temperature
    pub fn entries(&self) -> Vec<ReferenceEntry> {
        self.read()
            .iter()
            .map(|(key, vcf)| ReferenceEntry::new(key.density, key.temperature, *vcf))
            .collect()
    }

    /// One page of [`Self::entries`]
    pub fn page(&self, page: Option<usize>, per_page: usize) -> Page<ReferenceEntry> {
        Page::paginate(self.entries(), page, per_page)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Insert {
    Inserted,
    Duplicate,
    Rejected,
}

fn insert_if_absent(entries: &mut Entries, entry: ReferenceEntry) -> Insert {
    if !entry.is_finite() {
        warn!(%entry, "ignoring non-finite reference entry");
        return Insert::Rejected;
    }

    let key = GridKey::new(entry.density, entry.temperature);
    if entries.contains_key(&key) {
        return Insert::Duplicate;
    }
    entries.insert(key, entry.vcf);
    Insert::Inserted
}

fn insert_all<I>(entries: &mut Entries, items: I) -> BulkLoadSummary
where
    I: IntoIterator<Item = ReferenceEntry>,
{
    let mut summary = BulkLoadSummary::default();
    for entry in items {
        match insert_if_absent(entries, entry) {
            Insert::Inserted => summary.inserted += 1,
            Insert::Duplicate => summary.duplicates += 1,
            Insert::Rejected => summary.rejected += 1,
        }
    }
    summary
}

impl ReferenceLookup for ReferenceTable {
    fn exact_lookup(&self, density: f64, temperature: f64) -> Option<f64> {
        if !density.is_finite() || !temperature.is_finite() {
            return None;
        }
        self.read()
            .get(&GridKey::new(density, temperature))
            .copied()
    }

    fn neighborhood_entry(&self, density: f64, temperature: f64) -> Option<ReferenceEntry> {
        if !density.is_finite() || !temperature.is_finite() {
            return None;
        }

        let low = GridKey::new(density - DENSITY_STEP, f64::NEG_INFINITY);
        let high = GridKey::new(density + DENSITY_STEP, f64::INFINITY);
        let guard = self.read();
        let candidates = guard
            .range(low..=high)
            .map(|(key, vcf)| ReferenceEntry::new(key.density, key.temperature, *vcf));

        pick_neighbor(
            GridPoint {
                density,
                temperature,
            },
            candidates,
        )
    }
}
