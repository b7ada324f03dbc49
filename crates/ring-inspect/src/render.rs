//! Annotated overlays for inspected images.
//!
//! The grayscale input is promoted to RGB, the fitted nominal circle is
//! drawn in green and the defect point (if any) as a filled red dot.

use ::image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};
use nalgebra::Point2;
use std::path::Path;

use crate::detect::DetectError;
use crate::inspector::{DefectLocation, InspectionReport};

pub const CIRCLE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const DEFECT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Stroke width of the nominal circle, in pixels.
pub const CIRCLE_THICKNESS: i32 = 2;
pub const DEFECT_DOT_RADIUS: i32 = 5;

fn gray_to_rgb(raster: &GrayImage) -> RgbImage {
    RgbImage::from_fn(raster.width(), raster.height(), |x, y| {
        let v = raster.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    })
}

/// Draw the nominal circle and the defect marker over a copy of `raster`.
///
/// Centre and radius are truncated to whole pixels before drawing.
pub fn render_annotated(
    raster: &GrayImage,
    centroid: &Point2<f64>,
    radius: f64,
    defect: Option<&DefectLocation>,
) -> RgbImage {
    let mut canvas = gray_to_rgb(raster);
    let center = (centroid.x as i32, centroid.y as i32);
    let r = radius as i32;
    for ring in 0..CIRCLE_THICKNESS {
        draw_hollow_circle_mut(&mut canvas, center, r + ring, CIRCLE_COLOR);
    }
    if let Some(loc) = defect {
        draw_filled_circle_mut(
            &mut canvas,
            (loc.position.x, loc.position.y),
            DEFECT_DOT_RADIUS,
            DEFECT_COLOR,
        );
    }
    canvas
}

/// Render the overlay for a finished inspection.
pub fn render_report(raster: &GrayImage, report: &InspectionReport) -> RgbImage {
    render_annotated(raster, &report.centroid, report.radius, report.defect())
}

/// Render the overlay for `report` and write it to `path`.
///
/// The output format follows the file extension.
pub fn save_annotated(
    raster: &GrayImage,
    report: &InspectionReport,
    path: impl AsRef<Path>,
) -> Result<(), DetectError> {
    let path = path.as_ref();
    render_report(raster, report)
        .save(path)
        .map_err(|source| DetectError::ImageSave {
            path: path.to_path_buf(),
            source,
        })
}
