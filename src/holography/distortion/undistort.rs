use ndarray::{Array2, ArrayView2};

use super::camera::{CameraMatrix, DistortionCoefficients};

/// Bilinear sample at `(x, y)` = (column, row). Neighbours outside the image
/// contribute zero, so points more than one pixel off the edge read as zero.
fn bilinear_sample(image: &ArrayView2<f64>, x: f64, y: f64) -> f64 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }

    let (rows, cols) = image.dim();
    let x0 = x.floor();
    let y0 = y.floor();
    let dx = x - x0;
    let dy = y - y0;
    let (c0, r0) = (x0 as i64, y0 as i64);

    let pixel = |r: i64, c: i64| {
        if r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols {
            image[[r as usize, c as usize]]
        } else {
            0.0
        }
    };

    let top = pixel(r0, c0) * (1.0 - dx) + pixel(r0, c0 + 1) * dx;
    let bottom = pixel(r0 + 1, c0) * (1.0 - dx) + pixel(r0 + 1, c0 + 1) * dx;
    top * (1.0 - dy) + bottom * dy
}

/// Removes lens distortion from `image`.
///
/// Every output pixel is traced through the distortion model to its position
/// in the input and sampled there, so the result has the input's shape and
/// regions that map outside the input are zero.
pub fn undistort(
    image: ArrayView2<f64>,
    camera: &CameraMatrix,
    coefficients: &DistortionCoefficients,
) -> Array2<f64> {
    Array2::from_shape_fn(image.dim(), |(row, col)| {
        let normalized = camera.pixel_to_normalized([col as f64, row as f64]);
        let [x, y] = camera.normalized_to_pixel(coefficients.distort_normalized(normalized));
        bilinear_sample(&image, x, y)
    })
}
