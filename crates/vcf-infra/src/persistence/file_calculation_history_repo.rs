//! File-based calculation history repository implementation

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use tracing::debug;
use uuid::Uuid;

use vcf_domain::model::CalculationRecord;
use vcf_domain::repository::CalculationHistoryRepository;
use vcf_types::{Error, Result};

/// History file name inside the store directory
pub const HISTORY_FILE: &str = "calculations.json";

/// File-based implementation of CalculationHistoryRepository
///
/// Stores calculation records in a JSON file on disk.
pub struct FileCalculationHistoryRepository {
    store_path: PathBuf,
    records: RefCell<HashMap<Uuid, CalculationRecord>>,
}

impl FileCalculationHistoryRepository {
    /// Create or load a history repository
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join(HISTORY_FILE);

        let records = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            let stored: Vec<CalculationRecord> = serde_json::from_reader(reader)?;
            stored.into_iter().map(|r| (r.id, r)).collect()
        } else {
            HashMap::new()
        };

        Ok(Self {
            store_path,
            records: RefCell::new(records),
        })
    }

    /// Write `records` to disk
    fn persist(&self, records: &[CalculationRecord]) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, records)?;
        debug!(path = %self.store_path.display(), records = records.len(), "saved calculation history");
        Ok(())
    }

    /// All records sorted by creation time (newest first)
    pub fn all_records(&self) -> Vec<CalculationRecord> {
        let mut records: Vec<_> = self.records.borrow().values().cloned().collect();
        sort_newest_first(&mut records);
        records
    }

    pub fn count(&self) -> usize {
        self.records.borrow().len()
    }
}

fn sort_newest_first(records: &mut [CalculationRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

impl CalculationHistoryRepository for FileCalculationHistoryRepository {
    /// The record is kept in memory only once it is on disk
    fn save(&self, record: &CalculationRecord) -> std::result::Result<(), Error> {
        if self.records.borrow().contains_key(&record.id) {
            return Err(Error::Store(format!(
                "calculation {} already recorded",
                record.id
            )));
        }

        let mut pending = self.all_records();
        pending.push(record.clone());
        sort_newest_first(&mut pending);
        self.persist(&pending)?;

        self.records.borrow_mut().insert(record.id, record.clone());
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> std::result::Result<Option<CalculationRecord>, Error> {
        Ok(self.records.borrow().get(&id).cloned())
    }

    fn find_all(&self) -> std::result::Result<Vec<CalculationRecord>, Error> {
        Ok(self.all_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::tempdir;
    use vcf_domain::model::ReferenceEntry;
    use vcf_domain::service::TonnageCalculator;

    struct NoTable;

    impl vcf_domain::repository::ReferenceLookup for NoTable {
        fn exact_lookup(&self, _: f64, _: f64) -> Option<f64> {
            None
        }

        fn neighborhood_entry(&self, _: f64, _: f64) -> Option<ReferenceEntry> {
            None
        }
    }

    fn record(volume: f64, minutes: i64) -> CalculationRecord {
        let calc = TonnageCalculator::new(&NoTable).calculate(volume, 850.0, 20.0);
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        CalculationRecord::at(&calc, base + Duration::minutes(minutes))
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let repo = FileCalculationHistoryRepository::open(dir.path().to_path_buf()).unwrap();
        let first = record(1000.0, 0);
        let second = record(2000.0, 5);
        repo.save(&first).unwrap();
        repo.save(&second).unwrap();
        assert_eq!(repo.count(), 2);

        let reopened = FileCalculationHistoryRepository::open(dir.path().to_path_buf()).unwrap();
        let all = reopened.find_all().unwrap();
        assert_eq!(all, vec![second.clone(), first.clone()]);
        assert_eq!(reopened.find_by_id(first.id).unwrap(), Some(first));
        assert_eq!(reopened.find_by_id(Uuid::new_v4()).unwrap(), None);
    }

    #[test]
    fn test_records_are_immutable() {
        let dir = tempdir().unwrap();
        let repo = FileCalculationHistoryRepository::open(dir.path().to_path_buf()).unwrap();
        let rec = record(1000.0, 0);
        repo.save(&rec).unwrap();

        let mut altered = rec.clone();
        altered.tonnage = 1.0;
        assert!(matches!(repo.save(&altered), Err(Error::Store(_))));
        assert_eq!(repo.find_by_id(rec.id).unwrap(), Some(rec));
    }

    #[test]
    fn test_failed_write_leaves_history_unchanged() {
        let dir = tempdir().unwrap();
        let store_dir = dir.path().join("history");
        let repo = FileCalculationHistoryRepository::open(store_dir.clone()).unwrap();
        let kept = record(1000.0, 0);
        repo.save(&kept).unwrap();

        fs::remove_dir_all(&store_dir).unwrap();
        let lost = record(2000.0, 5);
        assert!(repo.save(&lost).is_err());
        assert_eq!(repo.count(), 1);
        assert_eq!(repo.find_by_id(lost.id).unwrap(), None);
        assert_eq!(repo.find_all().unwrap(), vec![kept]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(HISTORY_FILE), "{").unwrap();
        assert!(FileCalculationHistoryRepository::open(dir.path().to_path_buf()).is_err());
    }
}
