use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::input::expand_key;

/// Trailing window used to filter history, counted in calendar days.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HistoryPeriod {
    #[default]
    #[serde(rename = "7D")]
    Week,
    #[serde(rename = "14D")]
    TwoWeeks,
    #[serde(rename = "1M")]
    Month,
    #[serde(rename = "6M")]
    HalfYear,
    #[serde(rename = "1Y")]
    Year,
}

impl HistoryPeriod {
    pub const ALL: [HistoryPeriod; 5] = [
        HistoryPeriod::Week,
        HistoryPeriod::TwoWeeks,
        HistoryPeriod::Month,
        HistoryPeriod::HalfYear,
        HistoryPeriod::Year,
    ];

    pub fn days(self) -> i64 {
        match self {
            HistoryPeriod::Week => 7,
            HistoryPeriod::TwoWeeks => 14,
            HistoryPeriod::Month => 30,
            HistoryPeriod::HalfYear => 180,
            HistoryPeriod::Year => 365,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            HistoryPeriod::Week => "7D",
            HistoryPeriod::TwoWeeks => "14D",
            HistoryPeriod::Month => "1M",
            HistoryPeriod::HalfYear => "6M",
            HistoryPeriod::Year => "1Y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HistoryPeriod::Week => "7 days",
            HistoryPeriod::TwoWeeks => "14 days",
            HistoryPeriod::Month => "1 month",
            HistoryPeriod::HalfYear => "6 months",
            HistoryPeriod::Year => "12 months",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// Next longer window, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for HistoryPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow!("Unknown period: '{}' (expected one of 7d, 14d, 1m, 6m, 1y)", s))
    }
}

/// Which measurement a series is built from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    #[default]
    Weight,
    BodyFat,
}

impl Metric {
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Weight => "kg",
            Metric::BodyFat => "%",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Weight => "Weight",
            Metric::BodyFat => "Body fat",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Metric::Weight => Metric::BodyFat,
            Metric::BodyFat => Metric::Weight,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        // "body-fat", "body_fat" and "bodyFat" all collapse to "bodyfat"
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match expand_key(&key, &["weight", "bodyfat", "fat"])?.as_str() {
            "weight" => Ok(Metric::Weight),
            _ => Ok(Metric::BodyFat),
        }
    }
}
