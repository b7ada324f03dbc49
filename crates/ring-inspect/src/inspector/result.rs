use nalgebra::Point2;
use ring_inspect_core::{Contour, ContourPoint};
use serde::{Deserialize, Serialize};

/// Outer-profile verdict for one part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Every boundary point lies within the noise band around the nominal circle.
    Good,
    /// Material missing: some boundary points fall inside the band.
    Cut,
    /// Material excess: some boundary points protrude outside the band.
    Flash,
    /// Both a cut and a flash are present.
    Mixed,
}

impl Classification {
    /// Short label, also used in output file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Good => "Good",
            Classification::Cut => "Cut",
            Classification::Flash => "Flash",
            Classification::Mixed => "Mixed",
        }
    }

    /// Human-readable label used in the textual summary.
    pub fn description(&self) -> &'static str {
        match self {
            Classification::Mixed => "Mixed (Cut and Flash)",
            other => other.as_str(),
        }
    }

    #[inline]
    pub fn is_defective(&self) -> bool {
        !matches!(self, Classification::Good)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polar report of the governing boundary point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefectLocation {
    /// Direction from the centroid in image coordinates (y down), in (-180, 180].
    pub angle_deg: f64,
    /// Signed radial deviation at the point; negative for missing material.
    pub magnitude_px: f64,
    pub position: ContourPoint,
}

impl std::fmt::Display for DefectLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Angle: {:.1}°, Magnitude: {:.2} pixels, Position: ({}, {})",
            self.angle_deg, self.magnitude_px, self.position.x, self.position.y
        )
    }
}

/// Final per-image outcome: a classification and, for defective parts, where.
///
/// The defect location is present iff the classification is not `Good`;
/// the constructor is crate-private so that invariant always holds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InspectionResult {
    classification: Classification,
    defect: Option<DefectLocation>,
}

impl InspectionResult {
    pub(crate) fn new(classification: Classification, defect: Option<DefectLocation>) -> Self {
        debug_assert_eq!(classification.is_defective(), defect.is_some());
        Self {
            classification,
            defect,
        }
    }

    #[inline]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    #[inline]
    pub fn defect(&self) -> Option<&DefectLocation> {
        self.defect.as_ref()
    }
}

impl std::fmt::Display for InspectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Classification: {}, Location: ",
            self.classification.description()
        )?;
        match &self.defect {
            Some(loc) => write!(f, "{loc}"),
            None => f.write_str("No defect"),
        }
    }
}

/// Everything measured during one inspection run.
///
/// `result` is the contract output; the remaining fields are the fitted
/// geometry needed for rendering and diagnostics.
#[derive(Clone, Debug, Serialize)]
pub struct InspectionReport {
    pub result: InspectionResult,
    /// Area centroid of the whole mask.
    pub centroid: Point2<f64>,
    /// Median distance from the centroid to the outer contour points.
    pub radius: f64,
    /// Absolute deviation threshold in pixels (`threshold_factor * radius`).
    pub threshold: f64,
    pub max_deviation: f64,
    pub min_deviation: f64,
    /// Number of borders traced in the mask.
    pub contour_count: usize,
    /// Index of the selected outer border in extraction order.
    pub outer_index: usize,
    #[serde(skip)]
    pub outer_contour: Contour,
}

impl InspectionReport {
    #[inline]
    pub fn classification(&self) -> Classification {
        self.result.classification()
    }

    #[inline]
    pub fn defect(&self) -> Option<&DefectLocation> {
        self.result.defect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_summary_reports_no_defect() {
        let r = InspectionResult::new(Classification::Good, None);
        assert_eq!(r.to_string(), "Classification: Good, Location: No defect");
    }

    #[test]
    fn mixed_summary_uses_long_label() {
        let r = InspectionResult::new(
            Classification::Mixed,
            Some(DefectLocation {
                angle_deg: -45.04,
                magnitude_px: -3.456,
                position: ContourPoint::new(120, 80),
            }),
        );
        assert_eq!(
            r.to_string(),
            "Classification: Mixed (Cut and Flash), Location: Angle: -45.0°, Magnitude: -3.46 pixels, Position: (120, 80)"
        );
        assert_eq!(r.classification().as_str(), "Mixed");
    }
}
