//! chart-overlay: category alignment and layer overlay for dashboard charts.
//!
//! Financial dashboards draw stacked bars, overlay lines and forecast markers
//! from sparse per-category API rows. This crate holds the pure pipeline those
//! charts share: reconcile category axes, resolve one value domain across
//! layers, re-project line points onto bar centers, locate the forecast
//! boundary and aggregate tooltip payloads. Drawing stays with the host's
//! rendering library.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod telemetry;

pub use api::{CompositeChart, OverlayChartConfig};
pub use error::{OverlayError, OverlayResult};
