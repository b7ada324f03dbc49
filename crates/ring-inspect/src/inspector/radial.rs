//! Nominal radius and per-point radial deviation around the centroid.

use nalgebra::Point2;
use ring_inspect_core::ContourPoint;
use serde::Serialize;

#[inline]
fn radial_distance(centroid: &Point2<f64>, p: ContourPoint) -> f64 {
    let dx = p.x as f64 - centroid.x;
    let dy = p.y as f64 - centroid.y;
    (dx * dx + dy * dy).sqrt()
}

/// Median of `values`; the mean of the two middle values for even lengths.
pub(crate) fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some(0.5 * (values[mid - 1] + values[mid]))
    }
}

/// Robust nominal radius: the median distance from `centroid` to `points`.
///
/// The median keeps a localized defect from dragging the nominal circle
/// towards it. An empty point set has radius 0.
pub fn median_radius(centroid: &Point2<f64>, points: &[ContourPoint]) -> f64 {
    let mut distances: Vec<f64> = points
        .iter()
        .map(|&p| radial_distance(centroid, p))
        .collect();
    median(&mut distances).unwrap_or(0.0)
}

/// Signed radial deviations, index-aligned with the outer contour points.
///
/// Positive values lie outside the nominal circle (excess material),
/// negative values inside it (missing material).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DeviationProfile {
    deviations: Vec<f64>,
}

impl DeviationProfile {
    pub fn compute(centroid: &Point2<f64>, radius: f64, points: &[ContourPoint]) -> Self {
        Self {
            deviations: points
                .iter()
                .map(|&p| radial_distance(centroid, p) - radius)
                .collect(),
        }
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.deviations
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.deviations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deviations.is_empty()
    }

    /// First index holding the largest deviation.
    pub fn argmax(&self) -> Option<usize> {
        self.first_extreme(|candidate, best| candidate > best)
    }

    /// First index holding the smallest deviation.
    pub fn argmin(&self) -> Option<usize> {
        self.first_extreme(|candidate, best| candidate < best)
    }

    pub fn max(&self) -> Option<f64> {
        self.argmax().map(|i| self.deviations[i])
    }

    pub fn min(&self) -> Option<f64> {
        self.argmin().map(|i| self.deviations[i])
    }

    fn first_extreme(&self, better: impl Fn(f64, f64) -> bool) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &v) in self.deviations.iter().enumerate() {
            match best {
                Some(b) if !better(v, self.deviations[b]) => {}
                _ => best = Some(i),
            }
        }
        best
    }
}
