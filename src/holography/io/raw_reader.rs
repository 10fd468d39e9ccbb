//! Hologram reader for camera RAW files using the rawloader library.
//!
//! Monochrome sensors, and colour sensors read without demosaicing, deliver
//! the sensor mosaic as the intensity image. With demosaicing enabled the CFA
//! is interpolated and reduced to luminance first. The black level is removed
//! in both cases.

use std::io::Cursor;

use ndarray::Array2;
use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::holography::common::error::{ReconstructionError, Result};
use crate::holography::io::debayer::{cfa_from_name, demosaic_luminance};
use crate::holography::io::reader::HologramReader;
use crate::holography::io::types::{luminance, Hologram};

/// Default bit depth when no white level information is available from the RAW file.
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

/// The bit width of the u16 data type, used for calculating actual bits per sample.
const U16_BITS: u32 = 16;

/// RAW hologram reader (ARW, NEF, DNG, RAF, ...).
pub struct RawHologramReader {
    debayer: bool,
}

impl RawHologramReader {
    pub fn new(debayer: bool) -> Self {
        Self { debayer }
    }
}

/// Effective sensor bit depth from the white level, e.g. 4095 -> 12 bits.
fn bits_from_white_level(max_white_level: u16) -> u32 {
    if max_white_level == 0 {
        DEFAULT_BITS_PER_SAMPLE
    } else {
        U16_BITS - max_white_level.leading_zeros()
    }
}

impl HologramReader for RawHologramReader {
    fn read_hologram(&self, data: &[u8]) -> Result<Hologram> {
        debug!("Decoding RAW hologram, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| ReconstructionError::DecodeError(e.to_string()))?;

        let width = decoded.width;
        let height = decoded.height;
        let cpp = decoded.cpp;

        debug!("Decoded RAW image: {}x{}, {} component(s) per pixel", width, height, cpp);

        // Float data is normalized 0.0-1.0 and is scaled to the u16 range
        let mosaic: Vec<u16> = match decoded.data {
            RawloaderImageData::Integer(values) => values,
            RawloaderImageData::Float(values) => {
                values.iter().map(|&v| (v * u16::MAX as f32) as u16).collect()
            }
        };

        let max_white_level = decoded.whitelevels.iter().max().copied().unwrap_or(u16::MAX);
        let bits_per_sample = bits_from_white_level(max_white_level);
        let black = decoded.blacklevels[0] as f64;

        let intensity: Vec<f64> = match cpp {
            1 if self.debayer => {
                let cfa = cfa_from_name(&decoded.cfa.name).ok_or_else(|| {
                    ReconstructionError::UnsupportedFormat(format!("CFA pattern '{}'", decoded.cfa.name))
                })?;
                demosaic_luminance(&mosaic, width, height, bits_per_sample, cfa)
                    .map_err(|e| ReconstructionError::DecodeError(e.to_string()))?
            }
            1 => mosaic.iter().map(|&v| v as f64).collect(),
            3 => mosaic
                .chunks_exact(3)
                .map(|px| luminance(px[0] as f64, px[1] as f64, px[2] as f64))
                .collect(),
            other => {
                return Err(ReconstructionError::UnsupportedFormat(format!(
                    "{} components per pixel",
                    other
                )))
            }
        };

        let intensity = Array2::from_shape_vec(
            (height, width),
            intensity.into_iter().map(|v| (v - black).max(0.0)).collect(),
        )
        .map_err(|e| ReconstructionError::DecodeError(e.to_string()))?;

        debug!("Calculated bits_per_sample: {} (max white level: {})", bits_per_sample, max_white_level);

        Ok(Hologram::new(intensity, bits_per_sample))
    }
}
