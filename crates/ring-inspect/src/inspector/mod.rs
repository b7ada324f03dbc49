//! Ring outer-profile inspection pipeline.
//!
//! This module wires together binarization, border hierarchy tracing,
//! outer-rim selection, centroid and radius estimation, radial deviation
//! analysis, classification and defect localization.

mod classify;
mod error;
mod localize;
mod params;
mod pipeline;
mod radial;
mod result;
mod select;

pub use classify::classify;
pub use error::{InspectError, PipelineStage};
pub use localize::locate;
pub use params::{InspectParams, DEFAULT_THRESHOLD_FACTOR};
pub use pipeline::{inspect, RingInspector};
pub use radial::{median_radius, DeviationProfile};
pub use result::{Classification, DefectLocation, InspectionReport, InspectionResult};
pub use select::select_outer;
