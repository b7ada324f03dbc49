use ring_inspect_core::{ContourApproximation, DEFAULT_CUT_POINT};
use serde::{Deserialize, Serialize};

use super::InspectError;

/// Default fraction of the nominal radius treated as boundary noise.
pub const DEFAULT_THRESHOLD_FACTOR: f64 = 0.005;

/// Configuration for the ring inspector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectParams {
    /// Foreground/background split intensity.
    ///
    /// Pixels strictly darker than this value form the part body.
    pub cut_point: u8,
    /// Fraction of the nominal radius treated as noise.
    ///
    /// A boundary point deviating from the nominal circle by more than
    /// `threshold_factor * radius` pixels counts as a defect. Being relative,
    /// the threshold scales with the part size across images.
    pub threshold_factor: f64,
    /// Border pixels kept per traced contour.
    ///
    /// `Simple` keeps only direction-changing vertices, which is cheaper and
    /// does not change the classification contract.
    pub approximation: ContourApproximation,
}

impl Default for InspectParams {
    fn default() -> Self {
        Self {
            cut_point: DEFAULT_CUT_POINT,
            threshold_factor: DEFAULT_THRESHOLD_FACTOR,
            approximation: ContourApproximation::Simple,
        }
    }
}

impl InspectParams {
    pub fn with_cut_point(mut self, cut_point: u8) -> Self {
        self.cut_point = cut_point;
        self
    }

    pub fn with_threshold_factor(mut self, threshold_factor: f64) -> Self {
        self.threshold_factor = threshold_factor;
        self
    }

    pub fn with_approximation(mut self, approximation: ContourApproximation) -> Self {
        self.approximation = approximation;
        self
    }

    /// Reject values that would make every classification meaningless.
    pub fn validate(&self) -> Result<(), InspectError> {
        if !self.threshold_factor.is_finite() || self.threshold_factor < 0.0 {
            return Err(InspectError::InvalidParams {
                reason: format!(
                    "threshold_factor must be finite and non-negative, got {}",
                    self.threshold_factor
                ),
            });
        }
        Ok(())
    }
}
