//! Optional annotation layers built on top of the overlay core.

pub mod forecast_marker;

pub use forecast_marker::{
    ForecastMarker, ForecastMarkerConfig, MarkerLabelGeometry, place_forecast_marker,
};
