use std::io::Cursor;

use anyhow::Result;
use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use tracing::debug;

use crate::holography::io::types::luminance;

/// Maps a 2×2 colour filter name as reported by rawloader (e.g. "RGGB").
pub fn cfa_from_name(name: &str) -> Option<CFA> {
    match name.to_ascii_uppercase().as_str() {
        "RGGB" => Some(CFA::RGGB),
        "BGGR" => Some(CFA::BGGR),
        "GRBG" => Some(CFA::GRBG),
        "GBRG" => Some(CFA::GBRG),
        _ => None,
    }
}

/// Demosaics a single-channel Bayer mosaic and reduces every pixel to
/// luminance. Output is row-major, `width * height` long.
pub fn demosaic_luminance(
    mosaic: &[u16],
    width: usize,
    height: usize,
    bits_per_sample: u32,
    cfa: CFA,
) -> Result<Vec<f64>> {
    debug!("Demosaicing {}x{} mosaic, {} bits", width, height, bits_per_sample);

    // bayer only supports 8 and 16 bit rasters
    let (bayer_depth, raster_depth, bytes_per_pixel) = if bits_per_sample <= 8 {
        (BayerDepth::Depth8, RasterDepth::Depth8, 1)
    } else {
        (BayerDepth::Depth16LE, RasterDepth::Depth16, 2)
    };

    let bayer_bytes: Vec<u8> = if bytes_per_pixel == 1 {
        mosaic.iter().map(|&val| val as u8).collect()
    } else {
        mosaic.iter().flat_map(|&val| val.to_le_bytes()).collect()
    };

    let mut output_buf = vec![0u8; width * height * 3 * bytes_per_pixel];
    {
        let mut output_raster = RasterMut::new(width, height, raster_depth, &mut output_buf);
        bayer::run_demosaic(
            &mut Cursor::new(&bayer_bytes[..]),
            bayer_depth,
            cfa,
            Demosaic::Linear,
            &mut output_raster,
        )
        .map_err(|e| anyhow::anyhow!("Demosaic failed: {:?}", e))?;
    }

    let lum = output_buf
        .chunks_exact(bytes_per_pixel * 3)
        .map(|pixel| {
            let (r, g, b) = if bytes_per_pixel == 1 {
                (pixel[0] as f64, pixel[1] as f64, pixel[2] as f64)
            } else {
                (
                    u16::from_le_bytes([pixel[0], pixel[1]]) as f64,
                    u16::from_le_bytes([pixel[2], pixel[3]]) as f64,
                    u16::from_le_bytes([pixel[4], pixel[5]]) as f64,
                )
            };
            luminance(r, g, b)
        })
        .collect();

    Ok(lum)
}
