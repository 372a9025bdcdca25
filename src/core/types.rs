use serde::{Deserialize, Serialize};

/// Pixel extent of the plotting region a chart layer draws into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for PlotArea {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
        }
    }
}
