use chart_overlay::OverlayError;
use chart_overlay::api::OverlayChartConfig;
use chart_overlay::core::{DomainOptions, PlotArea};

#[test]
fn partial_json_falls_back_to_defaults() {
    let config = OverlayChartConfig::from_json_str(
        r#"{
            "plot": {"width": 640.0, "height": 320.0},
            "domain": {"padding_above": 2.2}
        }"#,
    )
    .expect("config");

    assert_eq!(config.plot, PlotArea::new(640.0, 320.0));
    assert_eq!(config.domain.padding_above, 2.2);
    assert_eq!(config.domain.padding_below, 1.1);
    assert!(config.domain.force_include_zero);
    assert_eq!(config.band_padding_inner, 0.1);
    assert_eq!(config.forecast_label.as_deref(), Some("Forecast"));
}

#[test]
fn config_roundtrips_through_json() {
    let config = OverlayChartConfig::new(PlotArea::new(900.0, 300.0))
        .with_domain(DomainOptions::secondary_line())
        .with_band_padding(0.25, 0.05)
        .with_forecast_label(None);
    let json = config.to_json_pretty().expect("json");
    let restored = OverlayChartConfig::from_json_str(&json).expect("restore");
    assert_eq!(restored, config);
}

#[test]
fn invalid_values_are_rejected() {
    let bad_plot = OverlayChartConfig::new(PlotArea::new(0.0, 300.0)).validate();
    assert!(matches!(bad_plot, Err(OverlayError::InvalidConfig(_))));

    let bad_band = OverlayChartConfig::default()
        .with_band_padding(-0.1, 0.0)
        .validate();
    assert!(matches!(bad_band, Err(OverlayError::InvalidConfig(_))));

    let bad_domain = OverlayChartConfig::default()
        .with_domain(DomainOptions::overlay().with_padding(0.9, 1.0))
        .validate();
    assert!(matches!(bad_domain, Err(OverlayError::InvalidConfig(_))));

    assert!(OverlayChartConfig::from_json_str("{not json").is_err());
}
