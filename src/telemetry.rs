//! Telemetry helpers for dashboards embedding `chart-overlay`.
//!
//! The overlay pipeline only emits `tracing` events; installing a subscriber
//! stays the host application's call. `init_default_tracing` is a shortcut for
//! hosts that do not have their own setup.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn,chart_overlay=info";

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter comes from `RUST_LOG`. Without it, pipeline events from this
/// crate are shown from `info` up and everything else from `warn`.
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let initialized = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
        return initialized;
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
