use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

use crate::model::record::DailyRecord;
use crate::repository::storage::{BlobStorage, FileBlobStorage};
use crate::repository::traits::RecordRepository;

type RecordMap = BTreeMap<String, DailyRecord>;

/// Record store over one JSON object blob: `{ "<date>": DailyRecord, ... }`.
pub struct BlobRecordRepository<S: BlobStorage> {
    storage: S,
}

pub type FileRecordRepository = BlobRecordRepository<FileBlobStorage>;

impl<S: BlobStorage> BlobRecordRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Loads the full mapping. A blob that does not decode is treated as
    /// an empty collection.
    fn read_records(&self) -> Result<RecordMap> {
        let bytes = match self.storage.read()? {
            Some(bytes) => bytes,
            None => return Ok(RecordMap::new()),
        };
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(RecordMap::new());
        }

        match serde_json::from_slice::<RecordMap>(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(error = %e, "Failed to parse stored records, treating as empty");
                Ok(RecordMap::new())
            }
        }
    }

    fn write_records(&self, records: &RecordMap) -> Result<()> {
        let bytes = serde_json::to_vec(records)?;
        self.storage.write(&bytes)
    }
}

impl FileRecordRepository {
    pub fn open(base_dir: Option<std::path::PathBuf>) -> Result<Self> {
        Ok(Self::new(FileBlobStorage::new(base_dir)?))
    }
}

impl<S: BlobStorage> RecordRepository for BlobRecordRepository<S> {
    fn get(&self, date: &str) -> Result<Option<DailyRecord>> {
        let mut records = self.read_records()?;
        Ok(records.remove(date))
    }

    fn upsert(&self, record: DailyRecord) -> Result<()> {
        if record.date.is_empty() {
            return Err(anyhow!("Record date must not be empty"));
        }
        let mut records = self.read_records()?;
        debug!(date = %record.date, "Upserting record");
        records.insert(record.date.clone(), record);
        self.write_records(&records)
    }

    fn list(&self) -> Result<Vec<DailyRecord>> {
        let mut records: Vec<DailyRecord> = self.read_records()?.into_values().collect();
        // Keys can drift from the inner date if the blob was edited by hand
        records.sort_by(|a, b| a.date.cmp(&b.date));
        debug!(count = records.len(), "Listed records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::storage::MemoryBlobStorage;
    use tempfile::tempdir;

    fn record(date: &str, weight: &str, body_fat: &str) -> DailyRecord {
        DailyRecord {
            date: date.to_string(),
            weight: weight.to_string(),
            body_fat: body_fat.to_string(),
        }
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let repo = BlobRecordRepository::new(MemoryBlobStorage::new());
        assert!(repo.list().unwrap().is_empty());
        assert_eq!(repo.get("2024-01-01").unwrap(), None);
    }

    #[test]
    fn test_upsert_then_get_round_trip() {
        let repo = BlobRecordRepository::new(MemoryBlobStorage::new());
        let r = record("2024-01-08", "69.5", "19.5");
        repo.upsert(r.clone()).unwrap();

        assert_eq!(repo.get("2024-01-08").unwrap(), Some(r));
        assert_eq!(repo.get("2024-01-09").unwrap(), None);
    }

    #[test]
    fn test_second_write_replaces_first() {
        let repo = BlobRecordRepository::new(MemoryBlobStorage::new());
        repo.upsert(record("2024-01-08", "70.0", "20.0")).unwrap();
        repo.upsert(record("2024-01-08", "", "18.2")).unwrap();

        let all = repo.list().unwrap();
        assert_eq!(all, vec![record("2024-01-08", "", "18.2")]);
    }

    #[test]
    fn test_list_is_sorted_and_unique() {
        let repo = BlobRecordRepository::new(MemoryBlobStorage::new());
        for (date, w) in [
            ("2024-03-01", "71"),
            ("2023-12-31", "72"),
            ("2024-01-15", "70"),
            ("2023-12-31", "73"),
            ("2024-03-01", "69"),
        ] {
            repo.upsert(record(date, w, "")).unwrap();
        }

        let dates: Vec<String> = repo.list().unwrap().into_iter().map(|r| r.date).collect();
        assert_eq!(dates, vec!["2023-12-31", "2024-01-15", "2024-03-01"]);
        assert_eq!(repo.get("2023-12-31").unwrap().unwrap().weight, "73");
    }

    #[test]
    fn test_rejects_empty_date() {
        let repo = BlobRecordRepository::new(MemoryBlobStorage::new());
        assert!(repo.upsert(record("", "70", "20")).is_err());
        assert!(repo.storage().contents().is_none());
    }

    #[test]
    fn test_corrupt_blob_reads_as_empty() {
        let storage = MemoryBlobStorage::new();
        let repo = BlobRecordRepository::new(&storage);
        repo.upsert(record("2024-01-01", "70", "20")).unwrap();

        storage.overwrite("{not json");
        assert!(repo.list().unwrap().is_empty());
        assert_eq!(repo.get("2024-01-01").unwrap(), None);

        storage.overwrite("[1, 2, 3]");
        assert!(repo.list().unwrap().is_empty());

        storage.overwrite(vec![0xff, 0xfe, 0x00]);
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_after_corruption_starts_fresh() {
        let storage = MemoryBlobStorage::with_contents("garbage");
        let repo = BlobRecordRepository::new(&storage);

        repo.upsert(record("2024-01-02", "68", "")).unwrap();
        assert_eq!(repo.list().unwrap(), vec![record("2024-01-02", "68", "")]);
    }

    #[test]
    fn test_persisted_layout() {
        let storage = MemoryBlobStorage::new();
        let repo = BlobRecordRepository::new(&storage);
        repo.upsert(record("2024-01-01", "70.0", "20.0")).unwrap();

        let blob = storage.contents().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&blob).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "2024-01-01": { "date": "2024-01-01", "weight": "70.0", "bodyFat": "20.0" }
            })
        );
    }

    #[test]
    fn test_reads_layout_written_elsewhere() {
        let storage = MemoryBlobStorage::with_contents(
            r#"{"2024-01-08":{"date":"2024-01-08","weight":"69.5","bodyFat":"19.5"},
                "2024-01-01":{"date":"2024-01-01","weight":"70.0","bodyFat":"20.0"}}"#,
        );
        let repo = BlobRecordRepository::new(storage);

        let all = repo.list().unwrap();
        assert_eq!(all[0], record("2024-01-01", "70.0", "20.0"));
        assert_eq!(all[1], record("2024-01-08", "69.5", "19.5"));
    }

    #[test]
    fn test_file_repository_persists_across_instances() {
        let dir = tempdir().unwrap();
        let base = Some(dir.path().to_path_buf());

        FileRecordRepository::open(base.clone())
            .unwrap()
            .upsert(record("2024-01-08", "69.5", "19.5"))
            .unwrap();

        let reopened = FileRecordRepository::open(base).unwrap();
        assert_eq!(
            reopened.get("2024-01-08").unwrap(),
            Some(record("2024-01-08", "69.5", "19.5"))
        );
    }
}
