use chart_overlay::telemetry::{DEFAULT_FILTER, init_default_tracing};

#[test]
fn default_filter_targets_this_crate() {
    assert!(DEFAULT_FILTER.contains("chart_overlay=info"));
}

#[cfg(not(feature = "telemetry"))]
#[test]
fn init_is_noop_without_feature() {
    assert!(!init_default_tracing());
}

#[cfg(feature = "telemetry")]
#[test]
fn second_init_reports_existing_subscriber() {
    let _ = init_default_tracing();
    assert!(!init_default_tracing());
}
