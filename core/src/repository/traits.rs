use crate::model::record::DailyRecord;
use anyhow::Result;

pub trait RecordRepository {
    fn get(&self, date: &str) -> Result<Option<DailyRecord>>;
    fn upsert(&self, record: DailyRecord) -> Result<()>;
    /// Every record, ascending by date.
    fn list(&self) -> Result<Vec<DailyRecord>>;
}
