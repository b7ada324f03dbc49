//! Foreground/background masks and inverse-polarity binarization.

use crate::image::GrayImageView;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Default intensity cut point: pixels strictly darker than this become foreground.
pub const DEFAULT_CUT_POINT: u8 = 127;

/// Row-major boolean raster, `true` = foreground.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<bool>,
}

impl BinaryMask {
    /// All-background mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![false; width * height],
        }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.data[y * self.width + x] = value;
    }

    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

/// Threshold a raster with inverted polarity.
///
/// A pixel is foreground iff its intensity is strictly below `cut_point`, so a
/// dark part on a bright background becomes the foreground body. Every pixel
/// is classified; there is no failure mode.
///
/// The mask always holds exactly `width * height` pixels. A view whose
/// buffer is shorter than its dimensions claim (possible through the public
/// fields) reads the missing pixels as background; extra bytes are ignored.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn binarize(img: &GrayImageView<'_>, cut_point: u8) -> BinaryMask {
    let len = img.width.saturating_mul(img.height);
    let mut data: Vec<bool> = img.data.iter().take(len).map(|&v| v < cut_point).collect();
    data.resize(len, false);
    BinaryMask {
        width: img.width,
        height: img.height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayImage;

    #[test]
    fn dark_pixels_become_foreground() {
        let img = GrayImage {
            width: 4,
            height: 1,
            data: vec![0, 126, 127, 255],
        };
        let mask = binarize(&img.view(), DEFAULT_CUT_POINT);
        assert_eq!(mask.data, vec![true, true, false, false]);
    }

    #[test]
    fn zero_cut_point_yields_empty_mask() {
        let img = GrayImage::new(8, 8, 0);
        let mask = binarize(&img.view(), 0);
        assert_eq!(mask.foreground_count(), 0);
    }

    #[test]
    fn short_buffer_still_yields_a_full_mask() {
        let view = GrayImageView {
            width: 4,
            height: 3,
            data: &[0, 0, 0, 0, 0],
        };
        let mask = binarize(&view, DEFAULT_CUT_POINT);
        assert_eq!(mask.data.len(), 12);
        assert_eq!(mask.foreground_count(), 5);
        assert!(!mask.get(3, 2));

        let m = crate::Moments::from_mask(&mask);
        assert_eq!(m.m00, 5.0);
        let tree = crate::find_contours(&mask, crate::ContourApproximation::None);
        assert_eq!(tree.len(), 1);
    }
}
