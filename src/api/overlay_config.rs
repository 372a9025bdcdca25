use serde::{Deserialize, Serialize};

use crate::core::{DomainOptions, PlotArea};
use crate::error::{OverlayError, OverlayResult};
use crate::extensions::ForecastMarkerConfig;

/// Per-chart configuration for a composite bar + line chart.
///
/// Serializable so dashboards can keep chart presets next to their queries
/// instead of hard-coding padding factors in every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayChartConfig {
    #[serde(default)]
    pub domain: DomainOptions,
    #[serde(default)]
    pub plot: PlotArea,
    #[serde(default = "default_band_padding_inner")]
    pub band_padding_inner: f64,
    #[serde(default = "default_band_padding_outer")]
    pub band_padding_outer: f64,
    #[serde(default = "default_forecast_label")]
    pub forecast_label: Option<String>,
    #[serde(default)]
    pub forecast_marker: ForecastMarkerConfig,
}

impl Default for OverlayChartConfig {
    fn default() -> Self {
        Self::new(PlotArea::default())
    }
}

impl OverlayChartConfig {
    #[must_use]
    pub fn new(plot: PlotArea) -> Self {
        Self {
            domain: DomainOptions::default(),
            plot,
            band_padding_inner: default_band_padding_inner(),
            band_padding_outer: default_band_padding_outer(),
            forecast_label: default_forecast_label(),
            forecast_marker: ForecastMarkerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: DomainOptions) -> Self {
        self.domain = domain;
        self
    }

    #[must_use]
    pub fn with_band_padding(mut self, inner: f64, outer: f64) -> Self {
        self.band_padding_inner = inner;
        self.band_padding_outer = outer;
        self
    }

    #[must_use]
    pub fn with_forecast_label(mut self, label: Option<String>) -> Self {
        self.forecast_label = label;
        self
    }

    #[must_use]
    pub fn with_forecast_marker(mut self, config: ForecastMarkerConfig) -> Self {
        self.forecast_marker = config;
        self
    }

    pub fn validate(self) -> OverlayResult<Self> {
        self.domain.validate()?;
        self.forecast_marker.validate()?;
        if !self.plot.is_valid() {
            return Err(OverlayError::InvalidConfig(format!(
                "plot area must be finite and > 0: width={}, height={}",
                self.plot.width, self.plot.height
            )));
        }
        if !self.band_padding_inner.is_finite()
            || !self.band_padding_outer.is_finite()
            || self.band_padding_inner < 0.0
            || self.band_padding_outer < 0.0
        {
            return Err(OverlayError::InvalidConfig(
                "band paddings must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> OverlayResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            OverlayError::InvalidConfig(format!("failed to parse overlay chart config: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> OverlayResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            OverlayError::InvalidConfig(format!("failed to serialize overlay chart config: {e}"))
        })
    }
}

fn default_band_padding_inner() -> f64 {
    0.1
}

fn default_band_padding_outer() -> f64 {
    0.1
}

fn default_forecast_label() -> Option<String> {
    Some("Forecast".to_owned())
}
