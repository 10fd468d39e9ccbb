//! Correction of the non-uniform magnification of spherical illumination
//!
//! A point source magnifies off-axis sample points slightly more than on-axis
//! ones. The correction approximates this with a single second-order radial
//! lens-distortion term whose strength comes from the acquisition geometry,
//! and undistorts the amplitude image with it.

pub mod camera;
mod undistort;

use ndarray::{Array2, ArrayView2};
use tracing::{debug, info};

use crate::holography::geometry::Geometry;

pub use camera::{CameraMatrix, DistortionCoefficients};
pub use undistort::undistort;

/// Worst-case radial magnification deviation across the field of view.
///
/// Compares the magnification at the sensor corner, which lies
/// `sqrt(W_c²/2 + L²)` from the source, against the on-axis magnification
/// `L / z`: `|(L + |sqrt(W_c²/2 + L²) - L|) / z - L / z|`.
pub fn max_distortion(geometry: &Geometry) -> f64 {
    let l = geometry.source_to_camera;
    let z = geometry.source_to_sample;
    let w = geometry.sensor_width;

    let corner_excess = ((w * w / 2.0 + l * l).sqrt() - l).abs();
    ((l + corner_excess) / z - l / z).abs()
}

/// Radial undistortion configured for one hologram size and geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistortionCorrector {
    pub camera: CameraMatrix,
    pub coefficients: DistortionCoefficients,
}

impl DistortionCorrector {
    pub fn new(camera: CameraMatrix, coefficients: DistortionCoefficients) -> Self {
        Self { camera, coefficients }
    }

    /// Synthetic intrinsics for a `rows`×`cols` image and `[Max_D, 0, 0, 0]`.
    pub fn for_geometry(geometry: &Geometry, rows: usize, cols: usize) -> Self {
        let max_d = max_distortion(geometry);
        info!(max_distortion = max_d, "Maximum radial distortion");

        let corrector = Self::new(
            CameraMatrix::synthetic(rows, cols),
            DistortionCoefficients::radial(max_d),
        );
        debug!("Camera matrix: {:?}", corrector.camera.to_matrix());
        corrector
    }

    pub fn max_distortion(&self) -> f64 {
        self.coefficients.k1
    }

    pub fn apply(&self, image: ArrayView2<f64>) -> Array2<f64> {
        undistort(image, &self.camera, &self.coefficients)
    }
}
