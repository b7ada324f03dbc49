//! Outer-profile defect classification for ring-shaped parts.
//!
//! This crate provides:
//! - the single-image inspection pipeline ([`inspector`]) that labels a part
//!   as good, cut, flash or mixed and locates the governing defect
//! - (feature-gated) helpers that load files with the `image` crate, render
//!   annotated overlays and drive whole batches of inputs.
//!
//! ## Quickstart
//!
//! ```no_run
//! use ring_inspect::detect;
//! use ring_inspect::InspectParams;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = detect::inspect_path("part.png", InspectParams::default())?;
//! println!("{}", report.result);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `ring_inspect::core`: grayscale views, binarization, moments and border tracing.
//! - `ring_inspect::inspector`: the inspection pipeline and its result types.
//! - `ring_inspect::detect` (feature `image`): end-to-end helpers from `image::GrayImage`.
//! - `ring_inspect::render` (feature `image`): annotated RGB overlays.
//! - `ring_inspect::batch` (feature `image`): continue-on-error processing of many files.

pub use ring_inspect_core as core;

pub mod inspector;

pub use inspector::{
    Classification, DefectLocation, InspectError, InspectParams, InspectionReport,
    InspectionResult, RingInspector,
};

#[cfg(feature = "image")]
pub mod batch;
#[cfg(feature = "image")]
pub mod detect;
#[cfg(feature = "image")]
pub mod render;
