use std::io::Write;

use ndarray::ArrayView2;
use tiff::encoder::{colortype, compression::DeflateLevel, Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::holography::common::error::{ReconstructionError, Result};
use crate::holography::config::{OutputEncoding, ReconstructionConfig, TiffCompression};
use crate::holography::io::writer::FieldWriter;

pub struct StandardTiffWriter;

fn compression_for(compression: TiffCompression) -> Compression {
    match compression {
        TiffCompression::None => Compression::Uncompressed,
        TiffCompression::Lzw => Compression::Lzw,
        TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
        TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
    }
}

/// Scales finite values linearly onto `0..=u16::MAX`. Non-finite samples and
/// constant fields map to zero.
fn normalize_to_u16(field: &ArrayView2<f64>) -> Vec<u16> {
    let (min, max) = field
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;

    field
        .iter()
        .map(|&v| {
            if !v.is_finite() || !(range > 0.0) {
                0
            } else {
                ((v - min) / range * u16::MAX as f64).round() as u16
            }
        })
        .collect()
}

impl FieldWriter for StandardTiffWriter {
    fn write_field(&self, field: ArrayView2<f64>, output: &mut dyn Write, config: &ReconstructionConfig) -> Result<()> {
        let (rows, cols) = field.dim();
        debug!("Encoding TIFF field: {}x{} as {:?}", cols, rows, config.output);

        let mut buffer = Vec::new();
        {
            let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| ReconstructionError::EncodeError(e.to_string()))?
                .with_compression(compression_for(config.compression));

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => Predictor::Horizontal,
                    _ => Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            let written = match config.output {
                OutputEncoding::Float32 => {
                    let samples: Vec<f32> = field.iter().map(|&v| v as f32).collect();
                    encoder.write_image::<colortype::Gray32Float>(cols as u32, rows as u32, &samples)
                }
                OutputEncoding::Normalized16 => {
                    let samples = normalize_to_u16(&field);
                    encoder.write_image::<colortype::Gray16>(cols as u32, rows as u32, &samples)
                }
            };
            written.map_err(|e| ReconstructionError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
