//! Hologram data types

use ndarray::Array2;

/// A decoded hologram ready for reconstruction
#[derive(Debug, Clone)]
pub struct Hologram {
    /// Intensity per pixel, rows × columns
    pub intensity: Array2<f64>,
    /// Bit depth of the source samples (e.g., 8, 12, 16, or 32 for float data)
    pub bits_per_sample: u32,
}

impl Hologram {
    pub fn new(intensity: Array2<f64>, bits_per_sample: u32) -> Self {
        Self {
            intensity,
            bits_per_sample,
        }
    }

    pub fn rows(&self) -> usize {
        self.intensity.nrows()
    }

    pub fn cols(&self) -> usize {
        self.intensity.ncols()
    }
}

/// Rec. 709 luma weights used for colour holograms.
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    0.2125 * r + 0.7154 * g + 0.0721 * b
}
