use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// Separator used by compound `<group>|||<period>` category keys.
pub const COMPOSITE_SEPARATOR: &str = "|||";

/// Position on the shared horizontal axis of a dashboard chart.
///
/// Dates are stored at day precision. Callers normalize finer timestamps
/// through [`Category::from_datetime_day`] before reconciliation so that two
/// samples of the same day collapse to one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Date(NaiveDate),
    Label(String),
    Composite { group: String, period: String },
}

impl Category {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> OverlayResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::Date)
            .ok_or_else(|| {
                OverlayError::InvalidData(format!("invalid calendar date {year}-{month}-{day}"))
            })
    }

    /// Last calendar day of `month`, the bucket key used by monthly series.
    pub fn month_end(year: i32, month: u32) -> OverlayResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|first| first.checked_add_months(Months::new(1)))
            .and_then(|next| next.pred_opt())
            .map(Self::Date)
            .ok_or_else(|| OverlayError::InvalidData(format!("invalid month {year}-{month}")))
    }

    #[must_use]
    pub fn from_datetime_day(time: DateTime<Utc>) -> Self {
        Self::Date(time.date_naive())
    }

    /// Parses a raw date value (`YYYY-MM-DD` or RFC 3339) into a day key.
    pub fn parse_date(raw: &str) -> OverlayResult<Self> {
        let trimmed = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self::Date(date));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|time| Self::from_datetime_day(time.with_timezone(&Utc)))
            .map_err(|e| OverlayError::InvalidData(format!("unparseable date `{trimmed}`: {e}")))
    }

    #[must_use]
    pub fn label(value: impl Into<String>) -> Self {
        Self::Label(value.into())
    }

    #[must_use]
    pub fn composite(group: impl Into<String>, period: impl Into<String>) -> Self {
        Self::Composite {
            group: group.into(),
            period: period.into(),
        }
    }

    /// Splits `<group>|||<period>` keys; anything else stays a plain label.
    #[must_use]
    pub fn parse_label(raw: &str) -> Self {
        match raw.split_once(COMPOSITE_SEPARATOR) {
            Some((group, period)) => Self::composite(group, period),
            None => Self::label(raw),
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Label(_) | Self::Composite { .. } => None,
        }
    }

    /// Raw key as it travels through the data layer.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
            Self::Label(label) => label.clone(),
            Self::Composite { group, period } => format!("{group}{COMPOSITE_SEPARATOR}{period}"),
        }
    }

    /// Absolute distance in days between two date categories.
    ///
    /// Returns `NaN` when either side is not a date; boundary lookups skip
    /// such entries.
    #[must_use]
    pub fn day_distance(&self, other: &Self) -> f64 {
        match (self.as_date(), other.as_date()) {
            (Some(a), Some(b)) => (a - b).num_days().abs() as f64,
            _ => f64::NAN,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Label(label) => f.write_str(label),
            Self::Composite { group, period } => write!(f, "{group} / {period}"),
        }
    }
}

/// Chronological order for date axes; labels fall back to lexical order.
#[must_use]
pub fn chronological(a: &Category, b: &Category) -> Ordering {
    a.cmp(b)
}

/// Orders composite keys by period first, then by group.
///
/// Used by charts that show every brand side by side inside one period.
#[must_use]
pub fn period_major(a: &Category, b: &Category) -> Ordering {
    match (a, b) {
        (
            Category::Composite {
                group: group_a,
                period: period_a,
            },
            Category::Composite {
                group: group_b,
                period: period_b,
            },
        ) => period_a.cmp(period_b).then_with(|| group_a.cmp(group_b)),
        _ => a.cmp(b),
    }
}
