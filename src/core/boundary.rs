use std::hash::Hash;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::category::Category;
use crate::core::reconcile::ReconciledAxis;

/// Distance between two categories; non-finite results mean "not comparable".
pub type CategoryDistance<'a, C> = &'a dyn Fn(&C, &C) -> f64;

/// Axis entry a boundary annotation (e.g. forecast start) attaches to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundaryMatch<C = Category> {
    Found { category: C, index: usize, exact: bool },
    NotFound,
}

impl<C> BoundaryMatch<C> {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    #[must_use]
    pub fn category(&self) -> Option<&C> {
        match self {
            Self::Found { category, .. } => Some(category),
            Self::NotFound => None,
        }
    }

    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Found { index, .. } => Some(*index),
            Self::NotFound => None,
        }
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Found { exact: true, .. })
    }
}

/// Finds the axis entry for a boundary key.
///
/// An exact match always wins. Otherwise, when `distance` is supplied, the
/// entry with the smallest absolute finite distance is returned, the earliest
/// in axis order on ties. Entries whose distance is `NaN` or infinite are
/// skipped. An empty axis, or one with no comparable entry, yields `NotFound`.
pub fn locate<C>(
    key: &C,
    axis: &ReconciledAxis<C>,
    distance: Option<CategoryDistance<'_, C>>,
) -> BoundaryMatch<C>
where
    C: Clone + Eq + Hash,
{
    if let Some(index) = axis.position(key) {
        return BoundaryMatch::Found {
            category: key.clone(),
            index,
            exact: true,
        };
    }

    let Some(distance) = distance else {
        debug!(axis_len = axis.len(), "boundary key not on axis");
        return BoundaryMatch::NotFound;
    };

    let nearest = axis
        .iter()
        .enumerate()
        .filter_map(|(index, category)| {
            let gap = distance(category, key).abs();
            gap.is_finite().then_some((index, category, gap))
        })
        .min_by_key(|(_, _, gap)| OrderedFloat(*gap));

    match nearest {
        Some((index, category, _)) => BoundaryMatch::Found {
            category: category.clone(),
            index,
            exact: false,
        },
        None => {
            debug!(axis_len = axis.len(), "no comparable axis entry for boundary");
            BoundaryMatch::NotFound
        }
    }
}

/// Locates a raw date value (`YYYY-MM-DD` or RFC 3339) on a date axis.
///
/// Unparseable input is treated like a missing boundary.
#[must_use]
pub fn locate_date(raw: &str, axis: &ReconciledAxis<Category>) -> BoundaryMatch<Category> {
    match Category::parse_date(raw) {
        Ok(key) => {
            let distance: CategoryDistance<'_, Category> = &Category::day_distance;
            locate(&key, axis, Some(distance))
        }
        Err(err) => {
            debug!(error = %err, "skipping boundary with unparseable date");
            BoundaryMatch::NotFound
        }
    }
}
