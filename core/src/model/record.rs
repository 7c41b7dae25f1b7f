use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::model::history::Metric;
use crate::time::date_key;

/// One day's entry. Measurements stay as the text the user typed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DailyRecord {
    pub date: String, // Key: "YYYY-MM-DD"
    #[serde(default)]
    pub weight: String,
    #[serde(default, rename = "bodyFat")]
    pub body_fat: String,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, weight: impl Into<String>, body_fat: impl Into<String>) -> Self {
        Self {
            date: date_key(date),
            weight: weight.into(),
            body_fat: body_fat.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.weight.is_empty() && self.body_fat.is_empty()
    }

    pub fn field(&self, metric: Metric) -> &str {
        match metric {
            Metric::Weight => &self.weight,
            Metric::BodyFat => &self.body_fat,
        }
    }
}
