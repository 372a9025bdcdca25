use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{BoundaryMatch, Category, PlotArea, RenderPosition, reproject_path};
use crate::error::{OverlayError, OverlayResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastMarkerConfig {
    pub label_char_width_px: f64,
    pub label_height_px: f64,
    pub label_horizontal_padding_px: f64,
    pub label_gap_px: f64,
}

impl Default for ForecastMarkerConfig {
    fn default() -> Self {
        Self {
            label_char_width_px: 7.0,
            label_height_px: 14.0,
            label_horizontal_padding_px: 6.0,
            label_gap_px: 4.0,
        }
    }
}

impl ForecastMarkerConfig {
    pub fn validate(self) -> OverlayResult<Self> {
        for (value, name) in [
            (self.label_char_width_px, "label_char_width_px"),
            (self.label_height_px, "label_height_px"),
            (
                self.label_horizontal_padding_px,
                "label_horizontal_padding_px",
            ),
            (self.label_gap_px, "label_gap_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OverlayError::InvalidConfig(format!(
                    "forecast marker config `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLabelGeometry {
    pub text: String,
    pub left_px: f64,
    pub top_px: f64,
    pub width_px: f64,
    pub height_px: f64,
}

/// Vertical reference line separating actuals from forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMarker<C = Category> {
    pub category: C,
    pub exact: bool,
    pub x: f64,
    pub top_y: f64,
    pub bottom_y: f64,
    pub label: Option<MarkerLabelGeometry>,
}

/// Places the forecast marker at the band center of the matched category.
///
/// `positions` are the renderer's unshifted positions for any layer on the
/// band scale. Returns `Ok(None)` when the boundary was not found or its
/// category has no rendered position; the marker is then skipped.
pub fn place_forecast_marker<C>(
    boundary: &BoundaryMatch<C>,
    positions: &[RenderPosition<C>],
    bandwidth: f64,
    plot: PlotArea,
    label: Option<&str>,
    config: ForecastMarkerConfig,
) -> OverlayResult<Option<ForecastMarker<C>>>
where
    C: Clone + PartialEq,
{
    let config = config.validate()?;
    if !plot.is_valid() {
        return Err(OverlayError::InvalidData(format!(
            "invalid plot area: width={}, height={}",
            plot.width, plot.height
        )));
    }

    let BoundaryMatch::Found {
        category,
        index,
        exact,
    } = boundary
    else {
        trace!("forecast boundary not found, marker skipped");
        return Ok(None);
    };

    let anchor = positions
        .get(*index)
        .filter(|position| position.category == *category)
        .or_else(|| {
            positions
                .iter()
                .find(|position| position.category == *category)
        });
    let Some(anchor) = anchor else {
        debug!(index, "forecast category has no rendered position");
        return Ok(None);
    };

    let x = reproject_path(std::slice::from_ref(anchor), bandwidth)
        .first()
        .map_or(anchor.x, |vertex| vertex.x);
    let label = label.map(|text| build_label_geometry(text, x, plot, config));

    Ok(Some(ForecastMarker {
        category: category.clone(),
        exact: *exact,
        x,
        top_y: 0.0,
        bottom_y: plot.height,
        label,
    }))
}

fn build_label_geometry(
    text: &str,
    x: f64,
    plot: PlotArea,
    config: ForecastMarkerConfig,
) -> MarkerLabelGeometry {
    let width = (text.chars().count() as f64 * config.label_char_width_px
        + 2.0 * config.label_horizontal_padding_px)
        .min(plot.width);
    let mut left = x + config.label_gap_px;
    if left + width > plot.width {
        left = x - config.label_gap_px - width;
    }
    let left = left.clamp(0.0, plot.width - width);

    MarkerLabelGeometry {
        text: text.to_owned(),
        left_px: left,
        top_px: config.label_gap_px,
        width_px: width,
        height_px: config.label_height_px,
    }
}
