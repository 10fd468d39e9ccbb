//! Pinhole intrinsics and radial-tangential coefficients used by the remap.

/// Pinhole camera intrinsics in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrix {
    /// Focal length applied to the column coordinate
    pub fx: f64,
    /// Focal length applied to the row coordinate
    pub fy: f64,
    /// Principal point, column coordinate
    pub cx: f64,
    /// Principal point, row coordinate
    pub cy: f64,
}

impl CameraMatrix {
    /// Notional intrinsics for an N×M hologram: focal lengths equal to the
    /// image dimensions, principal point at `(N/2, M/2)`.
    ///
    /// This is not a calibrated camera. The matrix only scales pixel offsets
    /// into the normalized radius the distortion polynomial is evaluated on.
    pub fn synthetic(rows: usize, cols: usize) -> Self {
        let (n, m) = (rows as f64, cols as f64);
        Self {
            fx: n,
            fy: m,
            cx: n / 2.0,
            cy: m / 2.0,
        }
    }

    /// Row-major 3×3 form `[[fx, 0, cx], [0, fy, cy], [0, 0, 1]]`.
    pub fn to_matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.fx, 0.0, self.cx],
            [0.0, self.fy, self.cy],
            [0.0, 0.0, 1.0],
        ]
    }

    pub fn pixel_to_normalized(&self, pixel_xy: [f64; 2]) -> [f64; 2] {
        [
            (pixel_xy[0] - self.cx) / self.fx,
            (pixel_xy[1] - self.cy) / self.fy,
        ]
    }

    pub fn normalized_to_pixel(&self, normalized_xy: [f64; 2]) -> [f64; 2] {
        [
            self.fx * normalized_xy[0] + self.cx,
            self.fy * normalized_xy[1] + self.cy,
        ]
    }
}

/// Four-term distortion vector `(k1, k2, p1, p2)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistortionCoefficients {
    /// Second-order radial coefficient
    pub k1: f64,
    /// Fourth-order radial coefficient
    pub k2: f64,
    /// Tangential coefficient p1
    pub p1: f64,
    /// Tangential coefficient p2
    pub p2: f64,
}

impl DistortionCoefficients {
    pub fn from_array(coefficients: [f64; 4]) -> Self {
        let [k1, k2, p1, p2] = coefficients;
        Self { k1, k2, p1, p2 }
    }

    /// `[k1, 0, 0, 0]`
    pub fn radial(k1: f64) -> Self {
        Self {
            k1,
            ..Self::default()
        }
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.k1, self.k2, self.p1, self.p2]
    }

    /// Applies the distortion model to normalized coordinates.
    pub fn distort_normalized(&self, normalized_xy: [f64; 2]) -> [f64; 2] {
        let [x, y] = normalized_xy;
        let r2 = x * x + y * y;
        let radial = 1.0 + self.k1 * r2 + self.k2 * r2 * r2;
        [
            x * radial + 2.0 * self.p1 * x * y + self.p2 * (r2 + 2.0 * x * x),
            y * radial + self.p1 * (r2 + 2.0 * y * y) + 2.0 * self.p2 * x * y,
        ]
    }
}
