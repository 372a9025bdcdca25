use std::cmp::Ordering;
use std::hash::Hash;

use indexmap::IndexSet;
use tracing::debug;

use crate::core::series::{Series, SeriesPoint};

/// Ordered, de-duplicated category axis shared by every layer of a chart.
#[derive(Debug, Clone)]
pub struct ReconciledAxis<C: Hash + Eq> {
    entries: IndexSet<C>,
}

impl<C: Hash + Eq> ReconciledAxis<C> {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: IndexSet::new(),
        }
    }

    /// Builds an axis from categories already in display order.
    ///
    /// Repeated categories keep their first position.
    pub fn from_ordered(categories: impl IntoIterator<Item = C>) -> Self {
        Self {
            entries: categories.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.entries.get_index(index)
    }

    #[must_use]
    pub fn position(&self, category: &C) -> Option<usize> {
        self.entries.get_index_of(category)
    }

    #[must_use]
    pub fn contains(&self, category: &C) -> bool {
        self.entries.contains(category)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &C> + '_ {
        self.entries.iter()
    }
}

impl<C: Hash + Eq + Clone> ReconciledAxis<C> {
    #[must_use]
    pub fn to_vec(&self) -> Vec<C> {
        self.entries.iter().cloned().collect()
    }
}

impl<C: Hash + Eq> Default for ReconciledAxis<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C: Hash + Eq> PartialEq for ReconciledAxis<C> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl<C: Hash + Eq> Eq for ReconciledAxis<C> {}

/// Merges the categories of every input series into one ordered axis.
///
/// `compare` must be a total order consistent with `Eq`. The sort is stable,
/// so keys that compare equal without being identical keep first-seen order.
/// An empty input yields an empty axis.
pub fn reconcile<'a, C, I, F>(series_list: I, mut compare: F) -> ReconciledAxis<C>
where
    C: Clone + Eq + Hash + 'a,
    I: IntoIterator<Item = &'a Series<C>>,
    F: FnMut(&C, &C) -> Ordering,
{
    let mut entries = IndexSet::new();
    let mut series_count = 0usize;
    for series in series_list {
        series_count += 1;
        for point in &series.points {
            if !entries.contains(&point.category) {
                entries.insert(point.category.clone());
            }
        }
    }

    entries.sort_by(|a, b| compare(a, b));
    debug!(
        series = series_count,
        categories = entries.len(),
        "reconciled category axis"
    );
    ReconciledAxis { entries }
}

/// Re-expresses `series` against `axis`, one point per axis entry.
///
/// Categories the series lacks become `None`. When a series repeats a
/// category the last observation wins; categories outside the axis are
/// dropped.
#[must_use]
pub fn rebind<C>(series: &Series<C>, axis: &ReconciledAxis<C>) -> Series<C>
where
    C: Clone + Eq + Hash,
{
    let mut values: Vec<Option<f64>> = vec![None; axis.len()];
    let mut dropped = 0usize;
    for point in &series.points {
        match axis.position(&point.category) {
            Some(index) => values[index] = point.value,
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(
            series_id = %series.id,
            dropped,
            "dropped categories outside the reconciled axis"
        );
    }

    Series {
        id: series.id.clone(),
        points: axis
            .iter()
            .cloned()
            .zip(values)
            .map(|(category, value)| SeriesPoint { category, value })
            .collect(),
    }
}

/// Rebinds every series against the same axis, preserving input order.
#[must_use]
pub fn rebind_all<C>(series_list: &[Series<C>], axis: &ReconciledAxis<C>) -> Vec<Series<C>>
where
    C: Clone + Eq + Hash,
{
    series_list
        .iter()
        .map(|series| rebind(series, axis))
        .collect()
}
