//! Angular-spectrum propagation from the camera plane to the sample plane

pub mod fft;
mod transfer;

use std::f64::consts::PI;

use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use tracing::debug;

use crate::holography::geometry::FrequencyGrid;

pub use fft::{fts, ifts};
pub use transfer::transfer_function;

/// Multiplies the centred spectrum of `hologram` by `transfer` and returns to
/// the spatial domain. `transfer` must have the hologram's shape.
pub fn propagate_with(hologram: ArrayView2<f64>, transfer: ArrayView2<Complex64>) -> Array2<Complex64> {
    let field = hologram.mapv(|intensity| Complex64::new(intensity, 0.0));
    let spectrum = fts(&field) * &transfer;
    ifts(&spectrum)
}

/// Back-propagates the recorded hologram over `distance` with the
/// angular-spectrum kernel built on `frequencies`.
pub fn propagate(
    hologram: ArrayView2<f64>,
    frequencies: &FrequencyGrid,
    wavenumber: f64,
    distance: f64,
) -> Array2<Complex64> {
    let (rows, cols) = hologram.dim();
    debug!("Propagating {}x{} hologram over {:.6e}", rows, cols, distance);

    let transfer = transfer_function(frequencies, wavenumber, distance);
    propagate_with(hologram, transfer.view())
}

/// `|Uz|` for every pixel.
pub fn amplitude(field: &Array2<Complex64>) -> Array2<f64> {
    field.mapv(|c| c.norm())
}

/// `arg(Uz)` for every pixel, in `(-π, π]`.
///
/// `atan2` yields `-π` for a negative real part with a negative-zero
/// imaginary part; that value is folded onto `π`.
pub fn phase(field: &Array2<Complex64>) -> Array2<f64> {
    field.mapv(|c| {
        let angle = c.arg();
        if angle <= -PI { PI } else { angle }
    })
}
