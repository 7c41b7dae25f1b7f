use serde::{Serialize, Deserialize};
use chrono::NaiveDate;
use crate::model::history::{HistoryPeriod, Metric};
use crate::model::record::DailyRecord;

/// One chart point. `record` is kept so list views can show both fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub short_label: String, // MM/DD
    pub value: f64,
    pub record: DailyRecord,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PeriodStats {
    /// Mean rounded to one decimal place.
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryReport {
    pub period: HistoryPeriod,
    pub metric: Metric,
    pub series: Vec<SeriesPoint>, // ascending by date
    pub stats: Option<PeriodStats>,
}

impl HistoryReport {
    pub fn empty(period: HistoryPeriod, metric: Metric) -> Self {
        Self {
            period,
            metric,
            series: Vec::new(),
            stats: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.series.iter().map(|p| p.value).collect()
    }

    /// Newest first, for list presentation.
    pub fn recent_first(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.series.iter().rev()
    }
}
