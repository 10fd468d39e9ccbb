use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use tracing::{debug, instrument};

use crate::holography::distortion::DistortionCorrector;
use crate::holography::geometry::{camera_grid, frequency_grid, Geometry};
use crate::holography::propagation::{self, propagate};
use crate::holography::reference_wave::radial_distance_map;

/// Complex field at the sample plane, before distortion correction.
#[derive(Debug, Clone)]
pub struct PropagatedField {
    /// `Uz`, shaped like the hologram
    pub field: Array2<Complex64>,
    /// Normalized spherical reference wave over the camera plane
    pub reference_wave: Array2<f64>,
}

/// Result of a full reconstruction.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// `|Uz|` after radial undistortion
    pub amplitude: Array2<f64>,
    /// `arg(Uz)` as propagated, without correction
    pub phase: Array2<f64>,
    /// Radial coefficient the amplitude was corrected with
    pub max_distortion: f64,
    /// Normalized spherical reference wave over the camera plane
    pub reference_wave: Array2<f64>,
}

impl PropagatedField {
    pub fn dim(&self) -> (usize, usize) {
        self.field.dim()
    }

    pub fn amplitude(&self) -> Array2<f64> {
        propagation::amplitude(&self.field)
    }

    pub fn phase(&self) -> Array2<f64> {
        propagation::phase(&self.field)
    }

    /// Splits the field and undistorts the amplitude. The phase is left as is.
    pub fn correct(self, geometry: &Geometry) -> Reconstruction {
        let (rows, cols) = self.dim();
        let corrector = DistortionCorrector::for_geometry(geometry, rows, cols);

        let amplitude = corrector.apply(self.amplitude().view());
        let phase = self.phase();

        Reconstruction {
            amplitude,
            phase,
            max_distortion: corrector.max_distortion(),
            reference_wave: self.reference_wave,
        }
    }
}

impl Reconstruction {
    pub fn dim(&self) -> (usize, usize) {
        self.amplitude.dim()
    }

    /// `(Amplitude, Phase)`
    pub fn into_parts(self) -> (Array2<f64>, Array2<f64>) {
        (self.amplitude, self.phase)
    }
}

/// Coordinate grids, reference wave and angular-spectrum propagation.
///
/// No preconditions are checked: a zero sample distance or a zero sensor
/// width yields non-finite values rather than an error.
#[instrument(skip_all, fields(rows = hologram.nrows(), cols = hologram.ncols()))]
pub fn back_propagate(hologram: ArrayView2<f64>, geometry: &Geometry) -> PropagatedField {
    let (rows, cols) = hologram.dim();

    let magnification = geometry.magnification();
    let sample_width = geometry.sample_width();
    debug!(
        magnification,
        sample_width,
        frequency_step = geometry.frequency_step(),
        "Derived geometry"
    );

    let camera = camera_grid(rows, cols, geometry.sensor_width);
    let reference_wave = radial_distance_map(&camera, geometry.propagation_distance());

    let frequencies = frequency_grid(rows, cols, sample_width);
    let field = propagate(
        hologram,
        &frequencies,
        geometry.wavenumber(),
        geometry.propagation_distance(),
    );

    PropagatedField {
        field,
        reference_wave,
    }
}

/// Reconstructs amplitude and phase at the sample plane from one hologram.
///
/// The amplitude is corrected for the radially varying magnification of the
/// point source; the phase is returned uncorrected. Both share the
/// hologram's shape.
pub fn reconstruct(hologram: ArrayView2<f64>, geometry: &Geometry) -> Reconstruction {
    back_propagate(hologram, geometry).correct(geometry)
}
