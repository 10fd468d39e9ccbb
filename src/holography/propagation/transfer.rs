use std::f64::consts::PI;

use ndarray::{Array2, Zip};
use num_complex::Complex64;

use crate::holography::geometry::FrequencyGrid;

/// Axial wavenumber `kz` from `kz² = k² - 4π²(fx² + fy²)`.
///
/// Above the cutoff `kz²` turns negative; the root is then taken on the
/// negative imaginary axis so that `exp(-i·d·kz)` decays with distance
/// instead of overflowing.
fn axial_wavenumber(kz2: f64) -> Complex64 {
    if kz2 >= 0.0 {
        Complex64::new(kz2.sqrt(), 0.0)
    } else {
        Complex64::new(0.0, -(-kz2).sqrt())
    }
}

/// Angular-spectrum kernel `E = exp(-i·d·kz(fx, fy))` over the frequency grid.
pub fn transfer_function(frequencies: &FrequencyGrid, wavenumber: f64, distance: f64) -> Array2<Complex64> {
    let k2 = wavenumber * wavenumber;
    let minus_i_d = Complex64::new(0.0, -distance);
    Zip::from(&frequencies.fx)
        .and(&frequencies.fy)
        .map_collect(|&fx, &fy| {
            let kz2 = k2 - 4.0 * PI * PI * (fx * fx + fy * fy);
            (minus_i_d * axial_wavenumber(kz2)).exp()
        })
}
