use crate::input::is_numeric_input;
use crate::model::record::DailyRecord;
use crate::repository::RecordRepository;
use crate::time::{date_key, today};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Both fields were empty, nothing was written.
    Skipped,
    Created,
    Updated,
}

impl SaveOutcome {
    pub fn message(self) -> &'static str {
        match self {
            SaveOutcome::Skipped => "Nothing to save",
            SaveOutcome::Created => "Saved today's record",
            SaveOutcome::Updated => "Updated today's record",
        }
    }
}

pub struct RecordService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn get_record(&self, date: NaiveDate) -> Result<Option<DailyRecord>> {
        self.repo.get(&date_key(date))
    }

    pub fn list_records(&self) -> Result<Vec<DailyRecord>> {
        self.repo.list()
    }

    /// Writes the day's values, replacing any earlier entry for `date`.
    ///
    /// Saving with both fields empty is a no-op. A single empty field is
    /// stored as is.
    pub fn save(&self, date: NaiveDate, weight: &str, body_fat: &str) -> Result<SaveOutcome> {
        for (name, value) in [("weight", weight), ("body fat", body_fat)] {
            if !is_numeric_input(value) {
                return Err(anyhow!("Invalid {}: '{}' (digits and one decimal point only)", name, value));
            }
        }

        let record = DailyRecord::new(date, weight, body_fat);
        if record.is_blank() {
            return Ok(SaveOutcome::Skipped);
        }

        let existed = self.repo.get(&record.date)?.is_some();
        self.repo.upsert(record)?;

        Ok(if existed { SaveOutcome::Updated } else { SaveOutcome::Created })
    }

    pub fn save_today(&self, weight: &str, body_fat: &str) -> Result<SaveOutcome> {
        self.save(today(), weight, body_fat)
    }
}
