use nalgebra::Matrix3;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Pinhole intrinsic matrix with square pixels and a centred principal point:
/// ```text
/// [[f, 0, width/2],
///  [0, f, height/2],
///  [0, 0, 1]]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    matrix: Matrix3<f64>,
}

impl CameraIntrinsics {
    /// Horizontal focal length in pixels.
    pub fn fx(&self) -> f64 {
        self.matrix[(0, 0)]
    }

    /// Vertical focal length in pixels.
    pub fn fy(&self) -> f64 {
        self.matrix[(1, 1)]
    }

    /// Horizontal component of the principal point.
    pub fn cx(&self) -> f64 {
        self.matrix[(0, 2)]
    }

    /// Vertical component of the principal point.
    pub fn cy(&self) -> f64 {
        self.matrix[(1, 2)]
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// The nine coefficients in row-major order.
    pub fn to_row_major(&self) -> [f64; 9] {
        row_major(&self.matrix)
    }
}

pub(crate) fn row_major(m: &Matrix3<f64>) -> [f64; 9] {
    [
        m[(0, 0)], m[(0, 1)], m[(0, 2)],
        m[(1, 0)], m[(1, 1)], m[(1, 2)],
        m[(2, 0)], m[(2, 1)], m[(2, 2)],
    ]
}

/// Derives the intrinsic matrix of an image from its size and the horizontal
/// field of view of the lens.
///
/// The focal length is `0.5 * width / tan(0.5 * hfov)`, shared by both axes.
/// Returns [`ConversionError::InvalidGeometry`] for an empty image, a field of
/// view outside the open interval (0, 180) degrees, or any input that would
/// produce a non-finite matrix.
pub fn build_intrinsics(width: usize, height: usize, hfov_degrees: f64) -> Result<CameraIntrinsics> {
    if width == 0 || height == 0 {
        return Err(ConversionError::InvalidGeometry(format!(
            "image dimensions must be positive, got {}x{}",
            width, height
        )));
    }

    if !hfov_degrees.is_finite() || hfov_degrees <= 0.0 || hfov_degrees >= 180.0 {
        return Err(ConversionError::InvalidGeometry(format!(
            "horizontal field of view must be between 0 and 180 degrees (exclusive), got {}",
            hfov_degrees
        )));
    }

    let width = width as f64;
    let height = height as f64;
    let hfov_radians = hfov_degrees.to_radians();
    let focal_length = 0.5 * width / (0.5 * hfov_radians).tan();

    if !focal_length.is_finite() || focal_length <= 0.0 {
        return Err(ConversionError::InvalidGeometry(format!(
            "field of view {} degrees gives a degenerate focal length {}",
            hfov_degrees, focal_length
        )));
    }

    debug!(
        "Intrinsics for {}x{} @ {} deg: f={:.3}px",
        width, height, hfov_degrees, focal_length
    );

    #[rustfmt::skip]
    let matrix = Matrix3::new(
        focal_length, 0.0,          width / 2.0,
        0.0,          focal_length, height / 2.0,
        0.0,          0.0,          1.0,
    );

    Ok(CameraIntrinsics { matrix })
}
