//! Spherical reference wave across the camera plane
//!
//! The diverging illumination reaches each sensor pixel after a path of
//! length `sqrt(u² + v² + (L - z)²)` measured from the sample plane. The
//! normalized map is kept with the reconstruction as a diagnostic; the
//! propagation kernel does not multiply it into the field.

use ndarray::{Array2, Zip};
use tracing::debug;

use crate::holography::geometry::CoordinateGrid;

/// Path length from the sample plane to every pixel, divided by its maximum.
///
/// Values lie in `(0, 1]` for a positive propagation distance, with the
/// smallest value at the optical axis and `1` at the sensor corners.
pub fn radial_distance_map(grid: &CoordinateGrid, propagation_distance: f64) -> Array2<f64> {
    let d2 = propagation_distance * propagation_distance;
    let mut r = Zip::from(&grid.u)
        .and(&grid.v)
        .map_collect(|&u, &v| (u * u + v * v + d2).sqrt());

    let max = r.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    debug!("Reference wave path length: max {:.6e}", max);

    r.mapv_inplace(|value| value / max);
    r
}
