use std::str::FromStr;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::category::Category;
use crate::core::primitives::{decimal_to_f64, finite_or_none};
use crate::core::series::{Series, SeriesPoint};

/// Raw cell returned by the data-fetching layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// Numeric reading of the cell.
    ///
    /// Money amounts often arrive as decimal strings (`"1234.50"`); those are
    /// parsed as decimals first, then as plain floats. Non-finite numbers and
    /// unparseable text read as `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => finite_or_none(*value),
            Self::Text(text) => {
                let trimmed = text.trim();
                Decimal::from_str(trimmed)
                    .ok()
                    .and_then(|value| decimal_to_f64(value, "field").ok())
                    .or_else(|| trimmed.parse::<f64>().ok())
                    .and_then(finite_or_none)
            }
            Self::Null => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Number(_) | Self::Null => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// One API row: field name to cell, in response order.
pub type Record = IndexMap<String, FieldValue>;

/// Reads a date category (`YYYY-MM-DD` or RFC 3339) from a cell.
#[must_use]
pub fn date_key(value: &FieldValue) -> Option<Category> {
    value
        .as_text()
        .and_then(|raw| Category::parse_date(raw).ok())
}

/// Reads a period or composite label from a cell.
#[must_use]
pub fn label_key(value: &FieldValue) -> Option<Category> {
    match value {
        FieldValue::Text(raw) => Some(Category::parse_label(raw)),
        FieldValue::Number(number) if number.is_finite() => {
            Some(Category::label(number.to_string()))
        }
        FieldValue::Number(_) | FieldValue::Null => None,
    }
}

/// Splits API rows into one series per value field.
///
/// Rows whose category cell is missing or unparseable are skipped. A value
/// field absent from a row, `null`, or non-numeric becomes a gap in that
/// series rather than a zero.
pub fn series_from_records<C, F>(
    records: &[Record],
    category_field: &str,
    value_fields: &[&str],
    mut parse_category: F,
) -> Vec<Series<C>>
where
    C: Clone,
    F: FnMut(&FieldValue) -> Option<C>,
{
    let mut series: Vec<Series<C>> = value_fields
        .iter()
        .map(|field| Series {
            id: (*field).to_owned(),
            points: Vec::with_capacity(records.len()),
        })
        .collect();

    let mut skipped = 0usize;
    for record in records {
        let Some(category) = record.get(category_field).and_then(&mut parse_category) else {
            skipped += 1;
            continue;
        };
        for (target, field) in series.iter_mut().zip(value_fields) {
            let value = record.get(*field).and_then(FieldValue::as_number);
            target.points.push(SeriesPoint::new(category.clone(), value));
        }
    }

    if skipped > 0 {
        debug!(
            skipped,
            category_field, "skipped records without a usable category"
        );
    }
    trace!(
        records = records.len(),
        series = series.len(),
        "built series from records"
    );
    series
}
