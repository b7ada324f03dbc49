use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::mask::BinaryMask;

/// Raw spatial moments of a binary mask up to first order.
///
/// `m00` is the foreground pixel count; `m10`/`m01` are the sums of the
/// foreground `x`/`y` coordinates. Pixel centers sit on integer coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    pub fn from_mask(mask: &BinaryMask) -> Self {
        // Accumulate per row in integers, then fold into f64 once per row.
        let mut m = Moments::default();
        for y in 0..mask.height {
            let row = &mask.data[y * mask.width..(y + 1) * mask.width];
            let mut count = 0u64;
            let mut sum_x = 0u64;
            for (x, &v) in row.iter().enumerate() {
                if v {
                    count += 1;
                    sum_x += x as u64;
                }
            }
            m.m00 += count as f64;
            m.m10 += sum_x as f64;
            m.m01 += (count * y as u64) as f64;
        }
        m
    }

    /// `true` when the mask carried no foreground mass at all.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.m00 <= 0.0
    }

    /// Area centroid `(m10 / m00, m01 / m00)`, or `None` for an empty mask.
    pub fn centroid(&self) -> Option<Point2<f64>> {
        if self.is_degenerate() {
            return None;
        }
        Some(Point2::new(self.m10 / self.m00, self.m01 / self.m00))
    }
}
