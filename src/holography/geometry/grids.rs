use ndarray::{Array1, Array2};

/// Camera-plane spatial coordinates, one pair per hologram pixel.
///
/// `u` varies along rows and `v` along columns, so `(u[[i, j]], v[[i, j]])`
/// is the position of pixel `(i, j)` on the sensor.
#[derive(Debug, Clone)]
pub struct CoordinateGrid {
    pub u: Array2<f64>,
    pub v: Array2<f64>,
}

/// Sample-plane spatial frequencies, laid out like [`CoordinateGrid`].
#[derive(Debug, Clone)]
pub struct FrequencyGrid {
    pub fx: Array2<f64>,
    pub fy: Array2<f64>,
    /// Spacing between neighbouring frequencies
    pub step: f64,
}

impl CoordinateGrid {
    pub fn dim(&self) -> (usize, usize) {
        self.u.dim()
    }
}

impl FrequencyGrid {
    pub fn dim(&self) -> (usize, usize) {
        self.fx.dim()
    }
}

/// `n` evenly spaced samples over the closed interval `[start, end]`.
pub fn linspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    Array1::linspace(start, end, n)
}

/// `n` samples `-n/2 * step + k * step`, `k = 0..n`.
///
/// The count is fixed by `n` rather than derived from `end / step`, which
/// would gain or lose a sample whenever the half-width is not an exact
/// multiple of `step` in floating point. The zero frequency falls on index
/// `n / 2` for even `n`.
pub fn stepped_axis(n: usize, step: f64) -> Array1<f64> {
    let start = -(n as f64) / 2.0 * step;
    Array1::from_iter((0..n).map(|k| start + k as f64 * step))
}

fn mesh(rows_axis: &Array1<f64>, cols_axis: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let shape = (rows_axis.len(), cols_axis.len());
    let along_rows = Array2::from_shape_fn(shape, |(i, _)| rows_axis[i]);
    let along_cols = Array2::from_shape_fn(shape, |(_, j)| cols_axis[j]);
    (along_rows, along_cols)
}

/// Sensor coordinates spanning `[-W_c/2, W_c/2]` on both axes.
pub fn camera_grid(rows: usize, cols: usize, sensor_width: f64) -> CoordinateGrid {
    let half = sensor_width / 2.0;
    let (u, v) = mesh(&linspace(-half, half, rows), &linspace(-half, half, cols));
    CoordinateGrid { u, v }
}

/// Frequencies spaced at `1 / W_s` and centred on zero.
pub fn frequency_grid(rows: usize, cols: usize, sample_width: f64) -> FrequencyGrid {
    let step = 1.0 / sample_width;
    let (fx, fy) = mesh(&stepped_axis(rows, step), &stepped_axis(cols, step));
    FrequencyGrid { fx, fy, step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_includes_both_endpoints() {
        let axis = linspace(-0.002, 0.002, 5);

        assert_eq!(axis.len(), 5);
        assert_relative_eq!(axis[0], -0.002);
        assert_relative_eq!(axis[2], 0.0);
        assert_relative_eq!(axis[4], 0.002, max_relative = 1e-12);
    }

    #[test]
    fn test_stepped_axis_has_exact_count() {
        // 1/0.003 is not representable, so end/step would not land on an integer
        let step = 1.0 / 0.003;
        for n in [1, 2, 7, 255, 256] {
            assert_eq!(stepped_axis(n, step).len(), n);
        }
    }

    #[test]
    fn test_stepped_axis_even_is_centred_at_half() {
        let axis = stepped_axis(8, 500.0);

        assert_eq!(axis[0], -2000.0);
        assert_eq!(axis[4], 0.0);
        assert_eq!(axis[7], 1500.0);
    }

    #[test]
    fn test_stepped_axis_odd_starts_half_step_off() {
        let axis = stepped_axis(5, 2.0);

        assert_eq!(axis.to_vec(), vec![-5.0, -3.0, -1.0, 1.0, 3.0]);
    }

    #[test]
    fn test_camera_grid_layout() {
        let grid = camera_grid(3, 4, 0.006);

        assert_eq!(grid.dim(), (3, 4));
        assert_eq!(grid.v.dim(), (3, 4));
        // u is constant along a row, v constant along a column
        assert_relative_eq!(grid.u[[0, 3]], -0.003, max_relative = 1e-12);
        assert_relative_eq!(grid.u[[2, 0]], 0.003, max_relative = 1e-12);
        assert_relative_eq!(grid.v[[1, 0]], -0.003, max_relative = 1e-12);
        assert_relative_eq!(grid.v[[1, 3]], 0.003, max_relative = 1e-12);
    }

    #[test]
    fn test_frequency_grid_spacing() {
        let grid = frequency_grid(4, 6, 0.002);

        assert_eq!(grid.dim(), (4, 6));
        assert_relative_eq!(grid.step, 500.0, max_relative = 1e-12);
        assert_relative_eq!(grid.fx[[1, 0]] - grid.fx[[0, 0]], grid.step, max_relative = 1e-12);
        assert_relative_eq!(grid.fy[[0, 1]] - grid.fy[[0, 0]], grid.step, max_relative = 1e-12);
        assert_eq!(grid.fx[[2, 5]], 0.0);
        assert_eq!(grid.fy[[3, 3]], 0.0);
    }
}
