use log::{debug, info};
use ring_inspect_core::{binarize, find_contours, BinaryMask, GrayImageView, Moments};

use super::classify::classify;
use super::localize::locate;
use super::radial::{median_radius, DeviationProfile};
use super::select::select_outer;
use super::{InspectError, InspectParams, InspectionReport, InspectionResult, PipelineStage};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Single-image ring inspector.
///
/// Stages run strictly forward (binarize, trace borders, select the outer
/// rim, centroid, radius, deviations, classify, localize); the first
/// failing stage ends the run. The inspector holds only immutable
/// parameters and can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct RingInspector {
    params: InspectParams,
}

impl RingInspector {
    /// Create an inspector, rejecting invalid parameters.
    pub fn new(params: InspectParams) -> Result<Self, InspectError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &InspectParams {
        &self.params
    }

    /// Inspect a grayscale raster.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image), fields(width = image.width, height = image.height))
    )]
    pub fn inspect(&self, image: &GrayImageView<'_>) -> Result<InspectionReport, InspectError> {
        let mask = binarize(image, self.params.cut_point);
        debug!(
            "{}: {} of {} pixels below cut point {}",
            PipelineStage::Binarize,
            mask.foreground_count(),
            mask.data.len(),
            self.params.cut_point
        );
        self.inspect_mask(&mask)
    }

    /// Inspect an already binarized mask.
    ///
    /// The foreground mass is checked before contour selection: an empty
    /// mask can never hold a ring and is reported as `DegenerateMask`.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, mask), fields(width = mask.width, height = mask.height))
    )]
    pub fn inspect_mask(&self, mask: &BinaryMask) -> Result<InspectionReport, InspectError> {
        let degenerate = InspectError::DegenerateMask {
            cut_point: self.params.cut_point,
        };
        let moments = Moments::from_mask(mask);
        if moments.is_degenerate() {
            return Err(degenerate);
        }

        let tree = find_contours(mask, self.params.approximation);
        let contour_count = tree.len();
        debug!("{}: {} borders", PipelineStage::ExtractContours, contour_count);

        let outer_index = select_outer(&tree)?;
        let outer_contour = tree.into_nodes().swap_remove(outer_index).contour;
        debug!(
            "{}: border #{} with {} points",
            PipelineStage::SelectOuter,
            outer_index,
            outer_contour.len()
        );

        // Whole-mask centroid: other foreground blobs bias it.
        let centroid = moments.centroid().ok_or(degenerate)?;
        debug!(
            "{}: ({:.3}, {:.3})",
            PipelineStage::EstimateCentroid,
            centroid.x,
            centroid.y
        );

        let points = &outer_contour.points;
        let radius = median_radius(&centroid, points);
        debug!("{}: {:.3} px", PipelineStage::EstimateRadius, radius);

        let profile = DeviationProfile::compute(&centroid, radius, points);
        let max_deviation = profile.max().unwrap_or(0.0);
        let min_deviation = profile.min().unwrap_or(0.0);
        let threshold = self.params.threshold_factor * radius;
        debug!(
            "{}: max {:+.3}, min {:+.3}, threshold {:.3}",
            PipelineStage::AnalyzeDeviation,
            max_deviation,
            min_deviation,
            threshold
        );

        let classification = classify(max_deviation, min_deviation, threshold);
        let defect = locate(classification, &profile, points, &centroid);
        let result = InspectionResult::new(classification, defect);
        info!("{result}");

        Ok(InspectionReport {
            result,
            centroid,
            radius,
            threshold,
            max_deviation,
            min_deviation,
            contour_count,
            outer_index,
            outer_contour,
        })
    }
}

/// One-shot helper: inspect `image` with `params` and return only the result.
pub fn inspect(
    image: &GrayImageView<'_>,
    params: InspectParams,
) -> Result<InspectionResult, InspectError> {
    Ok(RingInspector::new(params)?.inspect(image)?.result)
}
