//! Hologram reader for TIFF images using the tiff library.
//!
//! Grayscale images are used as recorded. Colour images (RGB, with or without
//! alpha) are reduced to luminance, which is what a monochrome sensor would
//! have integrated.

use std::io::Cursor;

use ndarray::Array2;
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::holography::common::error::{ReconstructionError, Result};
use crate::holography::io::reader::HologramReader;
use crate::holography::io::types::{luminance, Hologram};

/// Hologram reader for grayscale and RGB(A) TIFF files.
pub struct TiffHologramReader;

/// Samples per pixel and bit depth, or `None` for layouts a hologram can't have.
fn sample_layout(color: ColorType) -> Option<(usize, u32)> {
    match color {
        ColorType::Gray(bits) => Some((1, bits as u32)),
        ColorType::GrayA(bits) => Some((2, bits as u32)),
        ColorType::RGB(bits) => Some((3, bits as u32)),
        ColorType::RGBA(bits) => Some((4, bits as u32)),
        _ => None,
    }
}

fn samples_as_f64(image: DecodingResult) -> Result<Vec<f64>> {
    let samples = match image {
        DecodingResult::U8(values) => values.into_iter().map(f64::from).collect(),
        DecodingResult::U16(values) => values.into_iter().map(f64::from).collect(),
        DecodingResult::U32(values) => values.into_iter().map(f64::from).collect(),
        DecodingResult::F32(values) => values.into_iter().map(f64::from).collect(),
        DecodingResult::F64(values) => values,
        _ => {
            return Err(ReconstructionError::UnsupportedFormat(
                "TIFF sample type".to_string(),
            ))
        }
    };
    Ok(samples)
}

impl HologramReader for TiffHologramReader {
    /// Decodes a TIFF image into a hologram.
    ///
    /// # Returns
    ///
    /// * `Ok(Hologram)` - intensities laid out rows × columns
    /// * `Err(ReconstructionError)` - undecodable data or an unsupported
    ///   colour layout (palette, CMYK, ...)
    fn read_hologram(&self, data: &[u8]) -> Result<Hologram> {
        debug!("Decoding TIFF hologram, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(|e| ReconstructionError::DecodeError(e.to_string()))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| ReconstructionError::DecodeError(e.to_string()))?;
        let color = decoder
            .colortype()
            .map_err(|e| ReconstructionError::DecodeError(e.to_string()))?;
        let (channels, bits_per_sample) = sample_layout(color)
            .ok_or_else(|| ReconstructionError::UnsupportedFormat(format!("{:?}", color)))?;

        debug!("TIFF image: {}x{}, {:?}", width, height, color);

        let image = decoder
            .read_image()
            .map_err(|e| ReconstructionError::DecodeError(e.to_string()))?;
        let samples = samples_as_f64(image)?;

        let (rows, cols) = (height as usize, width as usize);
        if samples.len() != rows * cols * channels {
            return Err(ReconstructionError::DecodeError(format!(
                "expected {} samples, found {}",
                rows * cols * channels,
                samples.len()
            )));
        }

        let intensity: Vec<f64> = match channels {
            1 => samples,
            // Gray + alpha: drop alpha
            2 => samples.chunks_exact(2).map(|px| px[0]).collect(),
            _ => samples
                .chunks_exact(channels)
                .map(|px| luminance(px[0], px[1], px[2]))
                .collect(),
        };

        let intensity = Array2::from_shape_vec((rows, cols), intensity)
            .map_err(|e| ReconstructionError::DecodeError(e.to_string()))?;

        Ok(Hologram::new(intensity, bits_per_sample))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiff::encoder::{colortype, TiffEncoder};

    fn encode_gray16(width: u32, height: u32, data: &[u16]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
            encoder.write_image::<colortype::Gray16>(width, height, data).unwrap();
        }
        buffer
    }

    fn encode_rgb8(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
            encoder.write_image::<colortype::RGB8>(width, height, data).unwrap();
        }
        buffer
    }

    #[test]
    fn test_reads_gray16_row_major() {
        let data: Vec<u16> = (0..12).collect();
        let bytes = encode_gray16(4, 3, &data);

        let hologram = TiffHologramReader.read_hologram(&bytes).unwrap();

        assert_eq!(hologram.intensity.dim(), (3, 4));
        assert_eq!(hologram.bits_per_sample, 16);
        assert_eq!(hologram.intensity[[1, 0]], 4.0);
        assert_eq!(hologram.intensity[[2, 3]], 11.0);
    }

    #[test]
    fn test_rgb_is_reduced_to_luminance() {
        let data: Vec<u8> = vec![255, 0, 0, 0, 255, 0];
        let bytes = encode_rgb8(2, 1, &data);

        let hologram = TiffHologramReader.read_hologram(&bytes).unwrap();

        assert_eq!(hologram.intensity.dim(), (1, 2));
        assert!((hologram.intensity[[0, 0]] - 0.2125 * 255.0).abs() < 1e-9);
        assert!((hologram.intensity[[0, 1]] - 0.7154 * 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let result = TiffHologramReader.read_hologram(b"not a tiff");
        assert!(matches!(result, Err(ReconstructionError::DecodeError(_))));
    }
}
