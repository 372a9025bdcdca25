mod composite_chart;
mod json_contract;
mod overlay_config;

pub use composite_chart::{CompositeChart, CompositeChartSnapshot};
pub use json_contract::{COMPOSITE_SNAPSHOT_JSON_SCHEMA_V1, CompositeSnapshotJsonContractV1};
pub use overlay_config::OverlayChartConfig;
