pub mod boundary;
pub mod category;
pub mod primitives;
pub mod reconcile;
pub mod records;
pub mod reproject;
pub mod scale;
pub mod scale_domain;
pub mod series;
pub mod tooltip;
pub mod types;

pub use boundary::{BoundaryMatch, CategoryDistance, locate, locate_date};
pub use category::{COMPOSITE_SEPARATOR, Category, chronological, period_major};
pub use primitives::{decimal_to_f64, finite_or_none};
pub use reconcile::{ReconciledAxis, rebind, rebind_all, reconcile};
pub use records::{FieldValue, Record, date_key, label_key, series_from_records};
pub use reproject::{
    LineSegment, PathVertex, RenderPosition, line_segments, reproject, reproject_layers,
    reproject_path, resolve_bandwidth,
};
pub use scale::{BandScale, LinearScale};
pub use scale_domain::{DomainOptions, ScaleDomain, resolve_domain};
pub use series::{Series, SeriesPoint};
pub use tooltip::{
    BreakdownEntry, DetailMap, DetailRecord, NOT_AVAILABLE, SeriesReading, TooltipDetail,
    TooltipPayload, TooltipValue, aggregate, aggregate_reconciled,
};
pub use types::PlotArea;
