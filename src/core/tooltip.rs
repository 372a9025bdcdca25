use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::category::Category;
use crate::core::primitives::finite_or_none;
use crate::core::reconcile::ReconciledAxis;
use crate::core::series::Series;

/// Display text for a missing observation.
pub const NOT_AVAILABLE: &str = "N/A";

/// Tooltip reading that keeps "no data" distinct from zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TooltipValue {
    Value(f64),
    NotAvailable,
}

impl TooltipValue {
    #[must_use]
    pub fn from_option(value: Option<f64>) -> Self {
        match value.and_then(finite_or_none) {
            Some(value) => Self::Value(value),
            None => Self::NotAvailable,
        }
    }

    #[must_use]
    pub fn as_option(self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(value),
            Self::NotAvailable => None,
        }
    }

    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl fmt::Display for TooltipValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// One constituent of an aggregate bucket, e.g. a SKU inside "Other".
///
/// `value` drives the percentage split; `fields` carries extra named figures
/// (units, COGS, margin) through to the tooltip untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailRecord {
    pub value: Option<f64>,
    #[serde(default)]
    pub fields: IndexMap<String, f64>,
}

impl DetailRecord {
    #[must_use]
    pub fn new(value: Option<f64>) -> Self {
        Self {
            value,
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }
}

/// Breakdown of one category's aggregate into constituents, in display order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipDetail {
    pub constituents: IndexMap<String, DetailRecord>,
}

impl TooltipDetail {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_constituent(mut self, key: impl Into<String>, record: DetailRecord) -> Self {
        self.constituents.insert(key.into(), record);
        self
    }

    pub fn from_values<K: Into<String>>(values: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self {
            constituents: values
                .into_iter()
                .map(|(key, value)| (key.into(), DetailRecord::new(Some(value))))
                .collect(),
        }
    }

    /// Sum of the constituents' own available values.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.constituents
            .values()
            .filter_map(|record| record.value.and_then(finite_or_none))
            .sum()
    }
}

/// Precomputed breakdowns keyed by category.
pub type DetailMap<C = Category> = IndexMap<C, TooltipDetail>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReading {
    pub series_id: String,
    pub value: TooltipValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub value: TooltipValue,
    /// `None` when the value is missing or the detail sums to zero.
    pub percent_of_total: Option<f64>,
    pub fields: IndexMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipPayload {
    pub primary_label: String,
    pub primary_value: TooltipValue,
    pub series_values: Vec<SeriesReading>,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Builds the hover payload for `category`.
///
/// Series readings follow `series_list` order; a series without a value at
/// `category` reads `N/A`. The first series provides the primary value.
/// Breakdown percentages are shares of the detail's own total, so they close
/// to 100% whatever total the chart displays for the bucket.
#[must_use]
pub fn aggregate<'a, C>(
    category: &C,
    series_list: impl IntoIterator<Item = &'a Series<C>>,
    detail: Option<&DetailMap<C>>,
) -> TooltipPayload
where
    C: Eq + Hash + fmt::Display + 'a,
{
    let readings = series_list
        .into_iter()
        .map(|series| SeriesReading {
            series_id: series.id.clone(),
            value: TooltipValue::from_option(series.value_at(category)),
        })
        .collect();
    build_payload(category, readings, detail)
}

/// Indexed variant of [`aggregate`] for series already rebound to `axis`.
#[must_use]
pub fn aggregate_reconciled<'a, C>(
    category: &C,
    axis: &ReconciledAxis<C>,
    series_list: impl IntoIterator<Item = &'a Series<C>>,
    detail: Option<&DetailMap<C>>,
) -> TooltipPayload
where
    C: Eq + Hash + fmt::Display + 'a,
{
    let index = axis.position(category);
    let readings = series_list
        .into_iter()
        .map(|series| SeriesReading {
            series_id: series.id.clone(),
            value: TooltipValue::from_option(index.and_then(|i| series.value_at_index(i))),
        })
        .collect();
    build_payload(category, readings, detail)
}

fn build_payload<C>(
    category: &C,
    series_values: Vec<SeriesReading>,
    detail: Option<&DetailMap<C>>,
) -> TooltipPayload
where
    C: Eq + Hash + fmt::Display,
{
    let primary_value = series_values
        .first()
        .map_or(TooltipValue::NotAvailable, |reading| reading.value);
    let breakdown = detail
        .and_then(|map| map.get(category))
        .map(breakdown_entries)
        .unwrap_or_default();

    trace!(
        series = series_values.len(),
        breakdown = breakdown.len(),
        "aggregated tooltip payload"
    );
    TooltipPayload {
        primary_label: category.to_string(),
        primary_value,
        series_values,
        breakdown,
    }
}

fn breakdown_entries(detail: &TooltipDetail) -> Vec<BreakdownEntry> {
    let total = detail.total();
    detail
        .constituents
        .iter()
        .map(|(label, record)| {
            let value = TooltipValue::from_option(record.value);
            let percent_of_total = match value {
                TooltipValue::Value(v) if total != 0.0 => Some(v / total * 100.0),
                _ => None,
            };
            BreakdownEntry {
                label: label.clone(),
                value,
                percent_of_total,
                fields: record.fields.clone(),
            }
        })
        .collect()
}
