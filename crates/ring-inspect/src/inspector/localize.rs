use nalgebra::Point2;
use ring_inspect_core::ContourPoint;

use super::radial::DeviationProfile;
use super::{Classification, DefectLocation};

/// Fold an angle in degrees into `(-180, 180]`.
#[inline]
pub(crate) fn normalize_degrees(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}

/// Report the governing boundary point of a defective part.
///
/// `Cut` and `Mixed` report the deepest inward point, `Flash` the furthest
/// outward one; ties go to the first point in trace order. For `Mixed` the
/// missing-material side always wins, even though excess material is also
/// present. `Good` yields `None`.
pub fn locate(
    classification: Classification,
    profile: &DeviationProfile,
    points: &[ContourPoint],
    centroid: &Point2<f64>,
) -> Option<DefectLocation> {
    let idx = match classification {
        Classification::Good => return None,
        Classification::Cut | Classification::Mixed => profile.argmin()?,
        Classification::Flash => profile.argmax()?,
    };
    let position = *points.get(idx)?;
    let dy = position.y as f64 - centroid.y;
    let dx = position.x as f64 - centroid.x;
    Some(DefectLocation {
        angle_deg: normalize_degrees(dy.atan2(dx).to_degrees()),
        magnitude_px: profile.values()[idx],
        position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fixture() -> (Vec<ContourPoint>, DeviationProfile, Point2<f64>) {
        let c = Point2::new(0.0, 0.0);
        let pts = vec![
            ContourPoint::new(10, 0),
            ContourPoint::new(0, 13),
            ContourPoint::new(-10, 0),
            ContourPoint::new(0, -7),
        ];
        let profile = DeviationProfile::compute(&c, 10.0, &pts);
        (pts, profile, c)
    }

    #[test]
    fn good_has_no_location() {
        let (pts, profile, c) = fixture();
        assert!(locate(Classification::Good, &profile, &pts, &c).is_none());
    }

    #[test]
    fn flash_reports_the_outermost_point() {
        let (pts, profile, c) = fixture();
        let loc = locate(Classification::Flash, &profile, &pts, &c).expect("location");
        assert_eq!(loc.position, ContourPoint::new(0, 13));
        assert_relative_eq!(loc.magnitude_px, 3.0);
        assert_relative_eq!(loc.angle_deg, 90.0);
    }

    #[test]
    fn cut_and_mixed_report_the_innermost_point() {
        let (pts, profile, c) = fixture();
        for class in [Classification::Cut, Classification::Mixed] {
            let loc = locate(class, &profile, &pts, &c).expect("location");
            assert_eq!(loc.position, ContourPoint::new(0, -7));
            assert_relative_eq!(loc.magnitude_px, -3.0);
            assert_relative_eq!(loc.angle_deg, -90.0);
        }
    }

    #[test]
    fn angle_range_excludes_minus_180() {
        assert_relative_eq!(normalize_degrees(-180.0), 180.0);
        assert_relative_eq!(normalize_degrees(180.0), 180.0);
        assert_relative_eq!(normalize_degrees(540.0), 180.0);
        assert_relative_eq!(normalize_degrees(-190.0), 170.0);

        // Straight left of the centroid.
        let c = Point2::new(5.0, 0.0);
        let pts = [ContourPoint::new(0, 0)];
        let profile = DeviationProfile::compute(&c, 8.0, &pts);
        let loc = locate(Classification::Cut, &profile, &pts, &c).expect("location");
        assert_relative_eq!(loc.angle_deg, 180.0);
    }
}
