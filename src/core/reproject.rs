use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::category::Category;

/// Pixel position the renderer produced for one category of a layer.
///
/// `y: None` marks a gap; the slot is kept so point indices stay aligned with
/// the category axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPosition<C = Category> {
    pub category: C,
    pub x: f64,
    pub y: Option<f64>,
}

impl<C> RenderPosition<C> {
    #[must_use]
    pub fn new(category: C, x: f64, y: f64) -> Self {
        Self {
            category,
            x,
            y: Some(y),
        }
    }

    #[must_use]
    pub fn gap(category: C, x: f64) -> Self {
        Self { category, x, y: None }
    }

    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.y.is_some()
    }
}

/// Bare path vertex in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathVertex {
    pub x: f64,
    pub y: Option<f64>,
}

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Normalizes a renderer's bandwidth accessor.
///
/// Scales without a bandwidth (point or linear scales) and degenerate values
/// resolve to `0.0`, which makes reprojection a passthrough.
#[must_use]
pub fn resolve_bandwidth(accessor: Option<f64>) -> f64 {
    match accessor {
        Some(bandwidth) if bandwidth.is_finite() && bandwidth > 0.0 => bandwidth,
        _ => 0.0,
    }
}

fn center_offset(bandwidth: f64) -> Option<f64> {
    (bandwidth.is_finite() && bandwidth > 0.0).then_some(bandwidth * 0.5)
}

/// Shifts a point-scale layer onto the centers of a band-scale layer.
///
/// Every `x` moves right by `bandwidth / 2`; `y`, categories, order and gaps
/// are untouched. The input is left as-is so the unshifted layer stays
/// available for hit-testing.
#[must_use]
pub fn reproject<C: Clone>(positions: &[RenderPosition<C>], bandwidth: f64) -> Vec<RenderPosition<C>> {
    let Some(offset) = center_offset(bandwidth) else {
        trace!(bandwidth, "no usable bandwidth, positions passed through");
        return positions.to_vec();
    };

    positions
        .iter()
        .map(|position| RenderPosition {
            category: position.category.clone(),
            x: position.x + offset,
            y: position.y,
        })
        .collect()
}

/// Same shift as [`reproject`], reduced to vertices for path construction.
///
/// Gap vertices are kept; callers split the path at them.
#[must_use]
pub fn reproject_path<C>(positions: &[RenderPosition<C>], bandwidth: f64) -> Vec<PathVertex> {
    let offset = center_offset(bandwidth).unwrap_or(0.0);
    positions
        .iter()
        .map(|position| PathVertex {
            x: position.x + offset,
            y: position.y,
        })
        .collect()
}

/// Reprojects several line layers against the same band layer.
#[must_use]
pub fn reproject_layers<C: Clone>(
    layers: &[Vec<RenderPosition<C>>],
    bandwidth: f64,
) -> Vec<Vec<RenderPosition<C>>> {
    layers
        .iter()
        .map(|layer| reproject(layer, bandwidth))
        .collect()
}

/// Connects adjacent defined vertices; a gap vertex breaks the line.
#[must_use]
pub fn line_segments(vertices: &[PathVertex]) -> Vec<LineSegment> {
    vertices
        .windows(2)
        .filter_map(|pair| match (pair[0].y, pair[1].y) {
            (Some(y1), Some(y2)) => Some(LineSegment {
                x1: pair[0].x,
                y1,
                x2: pair[1].x,
                y2,
            }),
            _ => None,
        })
        .collect()
}
