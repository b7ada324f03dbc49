use serde::{Deserialize, Serialize};

/// Linear stages of one inspection run, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Configure,
    Binarize,
    ExtractContours,
    SelectOuter,
    EstimateCentroid,
    EstimateRadius,
    AnalyzeDeviation,
    Classify,
    Localize,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Configure => "configure",
            PipelineStage::Binarize => "binarize",
            PipelineStage::ExtractContours => "extract-contours",
            PipelineStage::SelectOuter => "select-outer",
            PipelineStage::EstimateCentroid => "estimate-centroid",
            PipelineStage::EstimateRadius => "estimate-radius",
            PipelineStage::AnalyzeDeviation => "analyze-deviation",
            PipelineStage::Classify => "classify",
            PipelineStage::Localize => "localize",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the ring inspector.
///
/// All of them are terminal for the current image only: the image content
/// is unsuitable, so there is nothing to retry.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InspectError {
    #[error("no ring detected: none of {contours} traced borders is a topmost border enclosing a hole")]
    NoRingDetected { contours: usize },
    #[error("degenerate mask: no pixel is darker than cut point {cut_point}")]
    DegenerateMask { cut_point: u8 },
    #[error("invalid inspection parameters: {reason}")]
    InvalidParams { reason: String },
}

impl InspectError {
    /// Stage at which the run terminated.
    ///
    /// An empty mask is caught right after binarization, before any border
    /// is traced, so `DegenerateMask` ends the run at `Binarize`.
    pub fn stage(&self) -> PipelineStage {
        match self {
            InspectError::NoRingDetected { .. } => PipelineStage::SelectOuter,
            InspectError::DegenerateMask { .. } => PipelineStage::Binarize,
            InspectError::InvalidParams { .. } => PipelineStage::Configure,
        }
    }
}
