use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::series::Series;
use crate::error::{OverlayError, OverlayResult};

/// Shared numeric extent of every layer drawn on one value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleDomain {
    pub min: f64,
    pub max: f64,
}

impl ScaleDomain {
    /// Returned when no layer has a single finite observation.
    pub const EMPTY: Self = Self { min: 0.0, max: 0.0 };

    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `true` for the "no data" domain; callers render an empty state.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.min == self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Headroom and baseline rules for one chart's value axis.
///
/// Paddings are multipliers on the magnitude of the extreme on each side:
/// `1.2` leaves 20% headroom, `1.0` leaves none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainOptions {
    pub padding_below: f64,
    pub padding_above: f64,
    pub force_include_zero: bool,
    /// Smallest span a resolved domain may have (all-zero input).
    pub min_span: f64,
}

impl Default for DomainOptions {
    fn default() -> Self {
        Self::overlay()
    }
}

impl DomainOptions {
    /// Plain bar + line overlay.
    #[must_use]
    pub fn overlay() -> Self {
        Self {
            padding_below: 1.1,
            padding_above: 1.1,
            force_include_zero: true,
            min_span: 1.0,
        }
    }

    /// Bars carrying value labels above them.
    #[must_use]
    pub fn labelled_bars() -> Self {
        Self {
            padding_above: 1.2,
            ..Self::overlay()
        }
    }

    /// Bars sharing the plot with a secondary (percentage) line drawn above.
    #[must_use]
    pub fn secondary_line() -> Self {
        Self {
            padding_above: 2.2,
            ..Self::overlay()
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding_below: f64, padding_above: f64) -> Self {
        self.padding_below = padding_below;
        self.padding_above = padding_above;
        self
    }

    #[must_use]
    pub fn with_force_include_zero(mut self, force_include_zero: bool) -> Self {
        self.force_include_zero = force_include_zero;
        self
    }

    #[must_use]
    pub fn with_min_span(mut self, min_span: f64) -> Self {
        self.min_span = min_span;
        self
    }

    pub fn validate(self) -> OverlayResult<Self> {
        if !self.padding_below.is_finite()
            || !self.padding_above.is_finite()
            || self.padding_below < 1.0
            || self.padding_above < 1.0
        {
            return Err(OverlayError::InvalidConfig(
                "domain paddings must be finite multipliers >= 1".to_owned(),
            ));
        }

        if !self.min_span.is_finite() || self.min_span <= 0.0 {
            return Err(OverlayError::InvalidConfig(
                "domain min span must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Resolves one domain for several layers drawn on the same value axis.
///
/// Each group is a stack: its series are summed per category before taking
/// extremes, so a stacked bar group and a separate line group can be passed
/// side by side. A group with only gaps at a category contributes nothing
/// there.
///
/// Paddings scale the magnitude of the extreme on their side. When the data's
/// extreme on a side is exactly zero the opposite extreme's magnitude is used
/// instead, so `max` stays above the largest value whenever upper padding is
/// above `1.0`.
///
/// Every series must have the same length (the reconciled axis length);
/// otherwise `ShapeMismatch` is returned. When no finite value exists at all
/// the result is [`ScaleDomain::EMPTY`].
pub fn resolve_domain<C>(
    series_groups: &[&[Series<C>]],
    options: DomainOptions,
) -> OverlayResult<ScaleDomain> {
    let options = options.validate()?;

    let mut all_series = series_groups.iter().flat_map(|group| group.iter());
    let Some(expected) = all_series.next().map(Series::len) else {
        return Ok(ScaleDomain::EMPTY);
    };
    if let Some(mismatch) = all_series.find(|series| series.len() != expected) {
        return Err(OverlayError::ShapeMismatch {
            expected,
            actual: mismatch.len(),
        });
    }

    let mut observed: Option<(f64, f64)> = None;
    for group in series_groups {
        for index in 0..expected {
            let Some(total) = stacked_total(group, index) else {
                continue;
            };
            observed = Some(match observed {
                Some((lo, hi)) => (lo.min(total), hi.max(total)),
                None => (total, total),
            });
        }
    }

    let Some((data_lo, data_hi)) = observed else {
        debug!(
            groups = series_groups.len(),
            "no finite observations, empty domain"
        );
        return Ok(ScaleDomain::EMPTY);
    };

    let (lo, hi) = if options.force_include_zero {
        (data_lo.min(0.0), data_hi.max(0.0))
    } else {
        (data_lo, data_hi)
    };

    // A side whose data extreme sits exactly on zero has no magnitude to
    // scale; it borrows the opposite side's so the padding still applies.
    let above_base = if data_hi == 0.0 { lo.abs() } else { hi.abs() };
    let below_base = if data_lo == 0.0 { hi.abs() } else { lo.abs() };
    let mut min = lo - (options.padding_below - 1.0) * below_base;
    let mut max = hi + (options.padding_above - 1.0) * above_base;

    if max - min < options.min_span {
        if hi <= 0.0 && lo < 0.0 {
            min = max - options.min_span;
        } else {
            max = min + options.min_span;
        }
        debug!(min, max, "widened degenerate domain to min span");
    }

    trace!(observed_min = lo, observed_max = hi, min, max, "resolved domain");
    Ok(ScaleDomain { min, max })
}

fn stacked_total<C>(group: &[Series<C>], index: usize) -> Option<f64> {
    group
        .iter()
        .filter_map(|series| series.value_at_index(index))
        .filter(|value| value.is_finite())
        .fold(None, |total, value| Some(total.unwrap_or(0.0) + value))
}
