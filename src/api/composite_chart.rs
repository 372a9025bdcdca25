use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{
    BandScale, BoundaryMatch, Category, CategoryDistance, DetailMap, LinearScale,
    ReconciledAxis, RenderPosition, ScaleDomain, Series, TooltipPayload, aggregate_reconciled,
    locate, locate_date, rebind_all, reconcile, reproject, resolve_domain,
};
use crate::error::{OverlayError, OverlayResult};
use crate::extensions::{ForecastMarker, place_forecast_marker};

use super::OverlayChartConfig;

/// Stacked bars plus overlay lines sharing one category axis and one value
/// domain.
///
/// Built once per data snapshot; every accessor is a pure read.
#[derive(Debug, Clone)]
pub struct CompositeChart<C: Hash + Eq = Category> {
    config: OverlayChartConfig,
    axis: ReconciledAxis<C>,
    bars: Vec<Series<C>>,
    lines: Vec<Series<C>>,
    domain: ScaleDomain,
}

/// Serializable state of a [`CompositeChart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeChartSnapshot<C = Category> {
    pub axis: Vec<C>,
    pub bars: Vec<Series<C>>,
    pub lines: Vec<Series<C>>,
    pub domain: ScaleDomain,
}

impl<C> CompositeChart<C>
where
    C: Clone + Eq + Hash,
{
    /// Reconciles every input onto one axis and resolves the shared domain.
    ///
    /// Bars form a single stacked group; each line is its own group.
    pub fn build<F>(
        bar_series: &[Series<C>],
        line_series: &[Series<C>],
        config: OverlayChartConfig,
        compare: F,
    ) -> OverlayResult<Self>
    where
        F: FnMut(&C, &C) -> Ordering,
    {
        let config = config.validate()?;
        let axis = reconcile(bar_series.iter().chain(line_series), compare);
        let bars = rebind_all(bar_series, &axis);
        let lines = rebind_all(line_series, &axis);

        let domain = {
            let mut groups: SmallVec<[&[Series<C>]; 4]> = SmallVec::new();
            if !bars.is_empty() {
                groups.push(bars.as_slice());
            }
            for line in &lines {
                groups.push(std::slice::from_ref(line));
            }
            resolve_domain(&groups, config.domain)?
        };

        debug!(
            categories = axis.len(),
            bars = bars.len(),
            lines = lines.len(),
            domain_min = domain.min,
            domain_max = domain.max,
            "built composite chart"
        );
        Ok(Self {
            config,
            axis,
            bars,
            lines,
            domain,
        })
    }

    #[must_use]
    pub fn config(&self) -> &OverlayChartConfig {
        &self.config
    }

    #[must_use]
    pub fn axis(&self) -> &ReconciledAxis<C> {
        &self.axis
    }

    #[must_use]
    pub fn bars(&self) -> &[Series<C>] {
        &self.bars
    }

    #[must_use]
    pub fn lines(&self) -> &[Series<C>] {
        &self.lines
    }

    #[must_use]
    pub fn domain(&self) -> ScaleDomain {
        self.domain
    }

    /// `true` when there is nothing to draw; show an empty state instead.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axis.is_empty() || self.domain.is_empty()
    }

    #[must_use]
    pub fn band_scale(&self) -> BandScale {
        BandScale::new(self.axis.len(), (0.0, self.config.plot.width))
            .with_padding(self.config.band_padding_inner, self.config.band_padding_outer)
    }

    /// Value scale over the shared domain; `None` for an empty chart.
    pub fn value_scale(&self) -> OverlayResult<Option<LinearScale>> {
        if self.domain.is_empty() {
            return Ok(None);
        }
        LinearScale::from_domain(self.domain).map(Some)
    }

    /// Left-edge band positions of one bar series, as a bar layer renders them.
    ///
    /// Bars stack in input order, so `y` is the top of the stack up to and
    /// including `series_index`. A gap in this series stays a gap; gaps in the
    /// series below contribute nothing to the stack.
    pub fn bar_positions(&self, series_index: usize) -> OverlayResult<Vec<RenderPosition<C>>> {
        let series = self.bars.get(series_index).ok_or_else(|| {
            OverlayError::InvalidData(format!("bar series index {series_index} out of range"))
        })?;
        let below = &self.bars[..series_index];
        let stack_tops = series.points.iter().enumerate().map(|(index, point)| {
            point.value.map(|value| {
                below
                    .iter()
                    .filter_map(|lower| lower.value_at_index(index))
                    .sum::<f64>()
                    + value
            })
        });
        self.band_positions(series.categories().zip(stack_tops))
    }

    /// Positions of one line series aligned to the centers of the bars.
    pub fn line_positions(&self, line_index: usize) -> OverlayResult<Vec<RenderPosition<C>>> {
        let series = self.lines.get(line_index).ok_or_else(|| {
            OverlayError::InvalidData(format!("line series index {line_index} out of range"))
        })?;
        let positions = self.band_positions(series.categories().zip(series.values()))?;
        Ok(reproject(&positions, self.band_scale().bandwidth()))
    }

    fn band_positions<'a>(
        &self,
        values: impl Iterator<Item = (&'a C, Option<f64>)>,
    ) -> OverlayResult<Vec<RenderPosition<C>>>
    where
        C: 'a,
    {
        let Some(scale) = self.value_scale()? else {
            return Ok(Vec::new());
        };
        let band = self.band_scale();
        let height = self.config.plot.height;

        let mut positions = Vec::with_capacity(self.axis.len());
        for (index, (category, value)) in values.enumerate() {
            let Some(x) = band.x(index) else {
                break;
            };
            let y = value
                .map(|value| scale.value_to_pixel(value, height))
                .transpose()?;
            positions.push(RenderPosition {
                category: category.clone(),
                x,
                y,
            });
        }
        Ok(positions)
    }

    pub fn locate_boundary(
        &self,
        key: &C,
        distance: Option<CategoryDistance<'_, C>>,
    ) -> BoundaryMatch<C> {
        locate(key, &self.axis, distance)
    }

    /// Places the forecast marker for an already located boundary.
    pub fn forecast_marker(
        &self,
        boundary: &BoundaryMatch<C>,
    ) -> OverlayResult<Option<ForecastMarker<C>>> {
        let band = self.band_scale();
        let positions: Vec<RenderPosition<C>> = self
            .axis
            .iter()
            .enumerate()
            .filter_map(|(index, category)| {
                band.x(index)
                    .map(|x| RenderPosition::gap(category.clone(), x))
            })
            .collect();
        place_forecast_marker(
            boundary,
            &positions,
            band.bandwidth(),
            self.config.plot,
            self.config.forecast_label.as_deref(),
            self.config.forecast_marker,
        )
    }

    /// Hover payload for `category`: bars first, then lines.
    #[must_use]
    pub fn tooltip_at(&self, category: &C, detail: Option<&DetailMap<C>>) -> TooltipPayload
    where
        C: fmt::Display,
    {
        aggregate_reconciled(
            category,
            &self.axis,
            self.bars.iter().chain(&self.lines),
            detail,
        )
    }

    #[must_use]
    pub fn snapshot(&self) -> CompositeChartSnapshot<C> {
        CompositeChartSnapshot {
            axis: self.axis.to_vec(),
            bars: self.bars.clone(),
            lines: self.lines.clone(),
            domain: self.domain,
        }
    }
}

impl CompositeChart<Category> {
    /// Locates a forecast start date, falling back to the nearest day.
    #[must_use]
    pub fn locate_forecast_boundary(&self, key: &Category) -> BoundaryMatch<Category> {
        let distance: CategoryDistance<'_, Category> = &Category::day_distance;
        locate(key, &self.axis, Some(distance))
    }

    #[must_use]
    pub fn locate_forecast_boundary_raw(&self, raw: &str) -> BoundaryMatch<Category> {
        locate_date(raw, &self.axis)
    }
}
