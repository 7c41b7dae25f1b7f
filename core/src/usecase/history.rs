use crate::input::parse_metric_value;
use crate::model::history::{HistoryPeriod, Metric};
use crate::model::record::DailyRecord;
use crate::repository::RecordRepository;
use crate::service::dto::{HistoryReport, PeriodStats, SeriesPoint};
use crate::time::{end_of_day, parse_date_key, short_label};
use anyhow::Result;
use chrono::{Days, Local, NaiveDateTime};

pub struct HistoryUseCase<'a, R: RecordRepository> {
    repo: &'a R,
}

impl<'a, R: RecordRepository> HistoryUseCase<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn report(&self, period: HistoryPeriod, metric: Metric, now: NaiveDateTime) -> Result<HistoryReport> {
        let records = self.repo.list()?;
        Ok(aggregate(&records, period, metric, now))
    }

    pub fn report_for_today(&self, period: HistoryPeriod, metric: Metric) -> Result<HistoryReport> {
        self.report(period, metric, Local::now().naive_local())
    }
}

/// Filters `records` to the trailing `period` ending on `now`'s day and
/// projects them onto `metric`.
///
/// Both the cutoff day (`now - period.days()`) and today are included.
/// Records whose date or metric text does not parse are skipped.
pub fn aggregate(records: &[DailyRecord], period: HistoryPeriod, metric: Metric, now: NaiveDateTime) -> HistoryReport {
    let now = end_of_day(now.date());
    let today = now.date();
    let cutoff = match today.checked_sub_days(Days::new(period.days() as u64)) {
        Some(cutoff) => cutoff,
        None => return HistoryReport::empty(period, metric),
    };

    let mut series: Vec<SeriesPoint> = records
        .iter()
        .filter_map(|record| {
            let date = parse_date_key(&record.date)?;
            if date < cutoff || date > today {
                return None;
            }
            let value = parse_metric_value(record.field(metric))?;
            Some(SeriesPoint {
                date,
                short_label: short_label(date),
                value,
                record: record.clone(),
            })
        })
        .collect();

    // Callers pass a sorted listing; sorting again keeps the contract for any slice
    series.sort_by_key(|p| p.date);

    let stats = compute_stats(&series);
    HistoryReport {
        period,
        metric,
        series,
        stats,
    }
}

pub fn compute_stats(series: &[SeriesPoint]) -> Option<PeriodStats> {
    if series.is_empty() {
        return None;
    }

    let values = series.iter().map(|p| p.value);
    let sum: f64 = values.clone().sum();
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);

    Some(PeriodStats {
        average: round_to_tenth(sum / series.len() as f64),
        min,
        max,
    })
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::record::BlobRecordRepository;
    use crate::repository::storage::MemoryBlobStorage;
    use chrono::NaiveDate;

    fn record(date: &str, weight: &str, body_fat: &str) -> DailyRecord {
        DailyRecord {
            date: date.to_string(),
            weight: weight.to_string(),
            body_fat: body_fat.to_string(),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_week_scenario() {
        let records = vec![
            record("2024-01-01", "70.0", "20.0"),
            record("2024-01-08", "69.5", "19.5"),
        ];

        let report = aggregate(&records, HistoryPeriod::Week, Metric::Weight, at(2024, 1, 8, 9));

        assert_eq!(report.values(), vec![70.0, 69.5]);
        let labels: Vec<&str> = report.series.iter().map(|p| p.short_label.as_str()).collect();
        assert_eq!(labels, vec!["01/01", "01/08"]);

        let stats = report.stats.unwrap();
        assert_eq!(stats.average, 69.8);
        assert_eq!(stats.min, 69.5);
        assert_eq!(stats.max, 70.0);
    }

    #[test]
    fn test_boundaries_inclusive_for_every_period() {
        let now = at(2024, 6, 30, 0);
        for period in HistoryPeriod::ALL {
            let today = now.date();
            let cutoff = today - chrono::Duration::days(period.days());
            let before = cutoff - chrono::Duration::days(1);
            let records = vec![
                record(&before.format("%Y-%m-%d").to_string(), "1", ""),
                record(&cutoff.format("%Y-%m-%d").to_string(), "2", ""),
                record(&today.format("%Y-%m-%d").to_string(), "3", ""),
            ];

            let report = aggregate(&records, period, Metric::Weight, now);
            assert_eq!(report.values(), vec![2.0, 3.0], "period {}", period);
        }
    }

    #[test]
    fn test_future_records_are_excluded() {
        let records = vec![
            record("2024-01-08", "69.5", ""),
            record("2024-01-09", "69.0", ""),
        ];
        let report = aggregate(&records, HistoryPeriod::Week, Metric::Weight, at(2024, 1, 8, 23));
        assert_eq!(report.values(), vec![69.5]);
    }

    #[test]
    fn test_cutoff_crosses_leap_day() {
        let records = vec![
            record("2024-02-23", "60", ""),
            record("2024-02-22", "61", ""),
        ];
        // 2024-03-01 minus 7 calendar days is 2024-02-23
        let report = aggregate(&records, HistoryPeriod::Week, Metric::Weight, at(2024, 3, 1, 12));
        assert_eq!(report.values(), vec![60.0]);
    }

    #[test]
    fn test_empty_metric_is_excluded_from_that_series_only() {
        let records = vec![
            record("2024-01-05", "", "21.0"),
            record("2024-01-06", "70.2", "abc"),
        ];
        let now = at(2024, 1, 8, 8);

        let weight = aggregate(&records, HistoryPeriod::Week, Metric::Weight, now);
        assert_eq!(weight.values(), vec![70.2]);

        let fat = aggregate(&records, HistoryPeriod::Week, Metric::BodyFat, now);
        assert_eq!(fat.values(), vec![21.0]);
        assert_eq!(fat.series[0].record.weight, "");
    }

    #[test]
    fn test_unparsable_dates_are_skipped() {
        let records = vec![
            record("not-a-date", "70", ""),
            record("2024-02-30", "70", ""),
            record("2024-01-07", "71", ""),
        ];
        let report = aggregate(&records, HistoryPeriod::Week, Metric::Weight, at(2024, 1, 8, 8));
        assert_eq!(report.values(), vec![71.0]);
    }

    #[test]
    fn test_empty_input_has_no_stats() {
        for period in HistoryPeriod::ALL {
            for metric in [Metric::Weight, Metric::BodyFat] {
                let report = aggregate(&[], period, metric, at(2024, 1, 8, 8));
                assert!(report.is_empty());
                assert!(report.stats.is_none());
            }
        }
    }

    #[test]
    fn test_all_unparsable_values_have_no_stats() {
        let records = vec![record("2024-01-07", "", ""), record("2024-01-08", ".", "")];
        let report = aggregate(&records, HistoryPeriod::Year, Metric::Weight, at(2024, 1, 8, 8));
        assert!(report.is_empty());
        assert_eq!(report.stats, None);
    }

    #[test]
    fn test_stats_rounding() {
        let records = vec![
            record("2024-01-06", "70.1", ""),
            record("2024-01-07", "70.2", ""),
            record("2024-01-08", "70.2", ""),
        ];
        let stats = aggregate(&records, HistoryPeriod::Week, Metric::Weight, at(2024, 1, 8, 8))
            .stats
            .unwrap();
        assert_eq!(stats.average, 70.2);
        assert_eq!(stats.min, 70.1);
        assert_eq!(stats.max, 70.2);
    }

    #[test]
    fn test_recent_first_reverses_series() {
        let records = vec![
            record("2024-01-06", "70", ""),
            record("2024-01-07", "71", ""),
            record("2024-01-08", "72", ""),
        ];
        let report = aggregate(&records, HistoryPeriod::Week, Metric::Weight, at(2024, 1, 8, 8));
        let dates: Vec<&str> = report.recent_first().map(|p| p.record.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-08", "2024-01-07", "2024-01-06"]);
    }

    #[test]
    fn test_usecase_reads_from_repository() {
        let repo = BlobRecordRepository::new(MemoryBlobStorage::new());
        repo.upsert(record("2024-01-01", "70.0", "20.0")).unwrap();
        repo.upsert(record("2024-01-08", "69.5", "19.5")).unwrap();
        repo.upsert(record("2023-06-01", "75.0", "25.0")).unwrap();

        let usecase = HistoryUseCase::new(&repo);
        let month = usecase.report(HistoryPeriod::Month, Metric::BodyFat, at(2024, 1, 8, 8)).unwrap();
        assert_eq!(month.values(), vec![20.0, 19.5]);

        let year = usecase.report(HistoryPeriod::Year, Metric::BodyFat, at(2024, 1, 8, 8)).unwrap();
        assert_eq!(year.values(), vec![25.0, 20.0, 19.5]);
        assert_eq!(year.stats.unwrap().average, 21.5);
    }
}
