use chrono::NaiveDate;
use pinkfit_core::time::{display_date, list_label};
use pinkfit_core::{DailyRecord, HistoryReport, PeriodStats};
use pinkfit_core::model::history::Metric;
use tabled::{Table, Tabled};
use tabled::settings::{Style, Color};
use tabled::settings::object::Rows;

// Helper struct for Table Row
#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Weight (kg)")]
    weight: String,
    #[tabled(rename = "Body fat (%)")]
    body_fat: String,
}

pub fn stats_line(stats: &PeriodStats, metric: Metric) -> String {
    format!(
        "Average: {:.1} {}   Min: {:.1}   Max: {:.1}",
        stats.average,
        metric.unit(),
        stats.min,
        stats.max
    )
}

fn or_dash(value: &str) -> String {
    if value.is_empty() { "-".to_string() } else { value.to_string() }
}

pub fn show_history(report: &HistoryReport) {
    println!(
        "\x1b[1;36m{} history, last {}\x1b[0m",
        report.metric.label(),
        report.period.label()
    );

    let stats = match &report.stats {
        Some(stats) => stats,
        None => {
            println!("No records in this period.");
            return;
        }
    };
    println!("{}", stats_line(stats, report.metric));

    let rows: Vec<HistoryRow> = report
        .recent_first()
        .map(|point| HistoryRow {
            date: list_label(point.date),
            weight: or_dash(&point.record.weight),
            body_fat: or_dash(&point.record.body_fat),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .modify(Rows::first(), Color::FG_CYAN); // Header color

    println!("{}", table);
}

pub fn show_record(date: NaiveDate, record: Option<&DailyRecord>) {
    println!("\x1b[1;36m{}\x1b[0m", display_date(date));
    match record {
        Some(record) => {
            println!("  Weight:   {} kg", or_dash(&record.weight));
            println!("  Body fat: {} %", or_dash(&record.body_fat));
        }
        None => println!("No record for today yet."),
    }
}
