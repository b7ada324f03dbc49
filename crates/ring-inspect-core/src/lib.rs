//! Core raster types and geometry for ring inspection.
//!
//! This crate does no image decoding: rasters are borrowed row-major 8-bit
//! buffers ([`GrayImageView`]).
//!
//! - [`binarize`]: inverse-polarity thresholding into a [`BinaryMask`].
//! - [`find_contours`]: Suzuki–Abe border following (via `imageproc`) with
//!   the full nesting hierarchy, stored as an index arena ([`ContourTree`]).
//! - [`Moments`]: raw area moments and the mask centroid.

mod contour;
mod image;
mod logger;
mod mask;
mod moments;

pub use contour::{
    find_contours, Contour, ContourApproximation, ContourKind, ContourNode, ContourPoint,
    ContourTree,
};
pub use crate::image::{GrayImage, GrayImageView, ImageViewError};
pub use mask::{binarize, BinaryMask, DEFAULT_CUT_POINT};
pub use moments::Moments;

#[cfg(feature = "tracing")]
pub use logger::{init_tracing, TracingFormat};

pub use logger::init_with_level;
