use serde::{Deserialize, Serialize};

use crate::core::scale_domain::ScaleDomain;
use crate::error::{OverlayError, OverlayResult};

/// Value axis mapping a domain onto an inverted Y pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> OverlayResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(OverlayError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    pub fn from_domain(domain: ScaleDomain) -> OverlayResult<Self> {
        Self::new(domain.min, domain.max)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps a value to pixel Y, `0` at the top of a plot `height_px` tall.
    pub fn value_to_pixel(self, value: f64, height_px: f64) -> OverlayResult<f64> {
        validate_height(height_px)?;
        if !value.is_finite() {
            return Err(OverlayError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(height_px - normalized * height_px)
    }

    pub fn pixel_to_value(self, pixel: f64, height_px: f64) -> OverlayResult<f64> {
        validate_height(height_px)?;
        if !pixel.is_finite() {
            return Err(OverlayError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (height_px - pixel) / height_px;
        Ok(self.domain_start + normalized * span)
    }
}

fn validate_height(height_px: f64) -> OverlayResult<()> {
    if !height_px.is_finite() || height_px <= 0.0 {
        return Err(OverlayError::InvalidData(
            "plot height must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

/// Categorical X scale allocating one fixed-width slot per category.
///
/// Mirrors what the rendering library does for bar layers: `x(index)` is the
/// slot's left edge and a bar spans `[x, x + bandwidth]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    count: usize,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    #[must_use]
    pub fn new(count: usize, range: (f64, f64)) -> Self {
        Self {
            count,
            range,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding in band units; negatives clamp to zero.
    #[must_use]
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    /// Width of one slot; `0` for an empty or zero-width range.
    #[must_use]
    pub fn bandwidth(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        let span = (self.range.1 - self.range.0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if !span.is_finite() || denom <= 0.0 {
            0.0
        } else {
            span / denom
        }
    }

    /// Distance between the left edges of two adjacent slots.
    #[must_use]
    pub fn step(self) -> f64 {
        self.bandwidth() * (1.0 + self.padding_inner)
    }

    /// Left edge of the slot at `index`, `None` past the last category.
    #[must_use]
    pub fn x(self, index: usize) -> Option<f64> {
        if index >= self.count {
            return None;
        }
        let start = self.range.0.min(self.range.1);
        Some(start + self.bandwidth() * self.padding_outer + self.step() * index as f64)
    }
}
