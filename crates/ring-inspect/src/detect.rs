use crate::inspector::{InspectError, InspectParams, InspectionReport, RingInspector};
use ring_inspect_core::GrayImageView;
use std::path::{Path, PathBuf};

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },

    #[error("failed to load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error("failed to write annotated image {}: {source}", .path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Inspect(#[from] InspectError),
}

impl DetectError {
    /// The inspector error, if the image loaded but could not be inspected.
    pub fn as_inspect(&self) -> Option<&InspectError> {
        match self {
            DetectError::Inspect(e) => Some(e),
            _ => None,
        }
    }
}

/// Convert an `image::GrayImage` into the lightweight `ring-inspect-core` view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Decode an image file and reduce it to a single 8-bit channel.
pub fn load_gray(path: impl AsRef<Path>) -> Result<::image::GrayImage, DetectError> {
    let path = path.as_ref();
    ::image::open(path)
        .map(|img| img.to_luma8())
        .map_err(|source| DetectError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })
}

/// Inspect an `image::GrayImage`.
pub fn inspect_image(
    img: &::image::GrayImage,
    params: InspectParams,
) -> Result<InspectionReport, DetectError> {
    let inspector = RingInspector::new(params)?;
    Ok(inspector.inspect(&gray_view(img))?)
}

/// Convenience overload using `InspectParams::default()`.
pub fn inspect_image_default(img: &::image::GrayImage) -> Result<InspectionReport, DetectError> {
    inspect_image(img, InspectParams::default())
}

/// Load `path` and inspect it.
pub fn inspect_path(
    path: impl AsRef<Path>,
    params: InspectParams,
) -> Result<InspectionReport, DetectError> {
    let img = load_gray(path)?;
    inspect_image(&img, params)
}

/// Build an `image::GrayImage` from a raw grayscale buffer.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::GrayImage, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h) else {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(DetectError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::GrayImage::from_raw(width, height, pixels.to_vec())
        .ok_or(DetectError::InvalidGrayDimensions { width, height })
}

/// Inspect a raw row-major grayscale buffer.
pub fn inspect_gray_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: InspectParams,
) -> Result<InspectionReport, DetectError> {
    let img = gray_image_from_slice(width, height, pixels)?;
    inspect_image(&img, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_buffer_is_rejected() {
        let err = gray_image_from_slice(4, 4, &[0u8; 15]).unwrap_err();
        assert!(matches!(
            err,
            DetectError::InvalidGrayBuffer {
                expected: 16,
                got: 15
            }
        ));
    }

    #[test]
    fn missing_file_is_an_image_load_failure() {
        let err = load_gray("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, DetectError::ImageLoad { .. }));
        assert!(err.as_inspect().is_none());
    }

    #[test]
    fn blank_buffer_surfaces_the_inspector_error() {
        let err = inspect_gray_u8(8, 8, &[255u8; 64], InspectParams::default()).unwrap_err();
        assert!(matches!(
            err.as_inspect(),
            Some(InspectError::DegenerateMask { .. })
        ));
    }
}
