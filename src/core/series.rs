use serde::{Deserialize, Serialize};

use crate::core::category::Category;
use crate::core::primitives::finite_or_none;

/// One observation of a series. `value: None` is an explicit gap, not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint<C = Category> {
    pub category: C,
    pub value: Option<f64>,
}

impl<C> SeriesPoint<C> {
    /// Creates a point; non-finite values are stored as gaps.
    #[must_use]
    pub fn new(category: C, value: Option<f64>) -> Self {
        Self {
            category,
            value: value.and_then(finite_or_none),
        }
    }
}

/// Named sequence of per-category observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series<C = Category> {
    pub id: String,
    pub points: Vec<SeriesPoint<C>>,
}

impl<C> Series<C> {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            points: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_pairs(
        id: impl Into<String>,
        pairs: impl IntoIterator<Item = (C, Option<f64>)>,
    ) -> Self {
        Self {
            id: id.into(),
            points: pairs
                .into_iter()
                .map(|(category, value)| SeriesPoint::new(category, value))
                .collect(),
        }
    }

    #[must_use]
    pub fn with_point(mut self, category: C, value: Option<f64>) -> Self {
        self.points.push(SeriesPoint::new(category, value));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn value_at_index(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|point| point.value)
    }

    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.points.iter().map(|point| point.value)
    }

    pub fn categories(&self) -> impl Iterator<Item = &C> + '_ {
        self.points.iter().map(|point| &point.category)
    }
}

impl<C: PartialEq> Series<C> {
    /// Value recorded for `category`; the latest duplicate wins.
    #[must_use]
    pub fn value_at(&self, category: &C) -> Option<f64> {
        self.points
            .iter()
            .rev()
            .find(|point| point.category == *category)
            .and_then(|point| point.value)
    }
}
