use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

const WEEKDAY_FORMAT: &str = "%a";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Storage key for a date: zero padded `YYYY-MM-DD`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Reads a `YYYY-MM-DD` key as plain year/month/day numbers.
///
/// No timezone is involved, so the same key always maps to the same
/// calendar day. Impossible dates (2024-02-30) are rejected.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let mut parts = key.trim().split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Chart axis label, `MM/DD`.
pub fn short_label(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

/// List row label, `MM/DD (Mon)`.
pub fn list_label(date: NaiveDate) -> String {
    format!("{} ({})", short_label(date), date.format(WEEKDAY_FORMAT))
}

/// Header label for the input screen, `2025-12-11 (Thu)`.
pub fn display_date(date: NaiveDate) -> String {
    format!("{} ({})", date_key(date), date.format(WEEKDAY_FORMAT))
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999 always exists
    let last_moment = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last_moment)
}
